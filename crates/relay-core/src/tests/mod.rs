mod measurement_value;

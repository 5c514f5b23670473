// dartnml/src/constants.rs

pub const DEFAULT_CONFIG_NAME: &str = "dartnml.yml";
pub const DEFAULT_MAKEFILE: &str = "Makefile";
pub const DEFAULT_NML: &str = "input.nml";
pub const DEFAULT_YAML: &str = "input_nml.yaml";

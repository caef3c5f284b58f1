pub const CLIENT_MUTATION_ID_LENGTH: usize = 32;

pub const KEY_CONVENTION: &str = "underscore";

pub const INPUT_ARGUMENT: &str = "input";

//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

/// The prompt printed before each REPL line.
pub const DEFAULT_PROMPT: &str = "> ";

/// The environment variable naming a configuration file.
pub const CONFIG_ENV_VAR: &str = "LOXFRONT_CONFIG";

/// The exit status for input with lexical or parse errors.
pub const EXIT_DATA_ERROR: i32 = 65;

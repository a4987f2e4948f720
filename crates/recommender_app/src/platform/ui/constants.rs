pub const CMD_SUBMIT: &str = ":submit";
pub const CMD_SAMPLE: &str = ":sample";
pub const CMD_SHOW: &str = ":show";
pub const CMD_HELP: &str = ":help";
pub const CMD_QUIT: &str = ":quit";

pub const NAME_WIDTH: usize = 40;
pub const DESCRIPTION_WIDTH: usize = 48;

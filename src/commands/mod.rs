pub type CmdResult<T> = detemplate::Result<(T, i32)>;

pub mod scaffold;

use clap::Parser;

mod commands;
mod output;
mod tty;

use commands::scaffold::{self, ScaffoldArgs};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "detemplate")]
#[command(version = VERSION)]
#[command(
    about = "Replace the 'template' placeholder in a freshly cloned repository with the repository's own name"
)]
struct Cli {
    #[command(flatten)]
    args: ScaffoldArgs,
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    let json = cli.args.json;

    let result = scaffold::run(cli.args);

    if json {
        let (json_result, exit_code) = output::map_cmd_result_to_json(result);
        if let Err(err) = output::print_json_result(json_result) {
            output::text::print_error(&err);
            return std::process::ExitCode::from(1);
        }
        return std::process::ExitCode::from(exit_code_to_u8(exit_code));
    }

    match result {
        Ok((data, exit_code)) => {
            if let Err(err) = output::text::print(&data) {
                output::text::print_error(&err);
                return std::process::ExitCode::from(1);
            }
            std::process::ExitCode::from(exit_code_to_u8(exit_code))
        }
        Err(err) => {
            let exit_code = output::exit_code_for_error(err.code);
            output::text::print_error(&err);
            std::process::ExitCode::from(exit_code_to_u8(exit_code))
        }
    }
}

fn exit_code_to_u8(code: i32) -> u8 {
    if code <= 0 {
        0
    } else if code >= 255 {
        255
    } else {
        code as u8
    }
}

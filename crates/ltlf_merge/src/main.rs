use std::{io, process::ExitCode};

use clap::{CommandFactory, Parser};
use ltlf_merge::{
    cli::{Args, Command, Output},
    init_logger, run,
};

use log::{error, trace};

fn main() -> ExitCode {
    let args = Args::parse();
    let output_format = args.output_format;

    init_logger();

    trace!("start");
    if let Command::Completions { shell } = &args.command {
        let mut command = Args::command();
        let name = command.get_name().to_string();
        clap_complete::generate(*shell, &mut command, name, &mut io::stdout());
        return ExitCode::SUCCESS;
    }

    let res = run(&args);
    let code = if res.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    };

    match output_format {
        Output::Quiet => {
            if let Err(e) = &res {
                error!("{e:#}")
            }
        }
        Output::Stdout => match &res {
            Ok(res) => println!("{res}"),
            Err(e) => eprintln!("Error: {e:#}"),
        },
        Output::Json | Output::PrettyJson => {
            let res = res.map_err(|e| format!("{e:#}"));
            let json = if output_format == Output::Json {
                serde_json::to_string(&res)
            } else {
                serde_json::to_string_pretty(&res)
            };
            match json {
                Ok(json) => println!("{json}"),
                Err(e) => {
                    eprintln!("Error: {e}");
                    return ExitCode::FAILURE;
                }
            }
        }
    }

    trace!("done");
    code
}

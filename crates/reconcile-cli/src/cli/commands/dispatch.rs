use super::super::args::{Cli, Command};
use crate::exit_codes;

pub async fn dispatch(cli: Cli) -> anyhow::Result<i32> {
    match cli.cmd {
        Command::Compare(args) => super::compare::run(args).await,
        Command::List(args) => super::list::run(args),
        Command::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(exit_codes::SUCCESS)
        }
    }
}

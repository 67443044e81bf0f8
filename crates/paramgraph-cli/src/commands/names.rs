//! Name validation command

use clap::Args;
use paramgraph_core::name;

#[derive(Args)]
pub struct NamesArgs {
    /// Names to check
    #[arg(required = true)]
    pub names: Vec<String>,
}

pub fn run(args: &NamesArgs) -> anyhow::Result<()> {
    let mut invalid = 0;
    for candidate in &args.names {
        match name::validate(candidate) {
            Ok(()) => println!("ok       {}", candidate),
            Err(e) => {
                invalid += 1;
                println!("invalid  {:?}: {}", candidate, e);
            }
        }
    }
    if invalid > 0 {
        anyhow::bail!("{} of {} names are invalid", invalid, args.names.len());
    }
    Ok(())
}

use crate::{
    db::{db::Db, migrations::report_status},
    libs::{config::Config, messages::Message},
    msg_success,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Show the database schema version and migration history instead
    #[arg(short, long)]
    status: bool,
}

pub fn cmd(init_args: InitArgs) -> Result<()> {
    let db = Db::new()?;
    if init_args.status {
        return report_status(&db.conn);
    }

    Config::init()?.save()?;

    msg_success!(Message::ConfigSaved);
    Ok(())
}

use multinet::{user_info, utils::prelude::*};

pub fn handle() -> Result<()> {
    let config = AppConfig::get();
    config.validate()?;
    user_info!("CONFIG", "{}", serde_json::to_string_pretty(config)?);
    Ok(())
}

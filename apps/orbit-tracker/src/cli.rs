//! 命令行参数。
//!
//! 未给出的参数回退到环境变量（见 `orbit_config::ConfigInput::from_env`）。

use clap::Parser;
use orbit_config::ConfigInput;

#[derive(Debug, Parser)]
#[command(
    name = "orbit-tracker",
    about = "Track the ISS and feed its position into a Tile38 geofence",
    disable_version_flag = true,
    after_help = "Examples:\n  orbit-tracker -t localhost:9851 -i 10 -s 5000 -l 33.4484,112.0740"
)]
pub struct Cli {
    /// show version and exit
    #[arg(short = 'v', long = "version")]
    pub version: bool,

    /// api query interval in seconds
    #[arg(short = 'i', long = "interval", value_name = "SECONDS")]
    pub interval: Option<String>,

    /// size of geofence in meters
    #[arg(short = 's', long = "size", value_name = "METERS")]
    pub size: Option<String>,

    /// tile38 address & port, format: "127.0.0.1:9851"
    #[arg(short = 't', long = "tile38", value_name = "HOST:PORT")]
    pub tile38: Option<String>,

    /// location for geofence, format: 33.4484,112.0740
    #[arg(
        short = 'l',
        long = "location",
        value_name = "LAT,LON",
        allow_hyphen_values = true
    )]
    pub location: Option<String>,
}

impl Cli {
    /// 转换为原始配置（仅包含命令行中出现的项）。
    pub fn into_input(self) -> ConfigInput {
        ConfigInput {
            store_address: self.tile38,
            geofence_radius_m: self.size,
            geofence_location: self.location,
            poll_interval_seconds: self.interval,
            ..ConfigInput::default()
        }
    }
}

/// `-v` 输出内容。构建时可通过 `GIT_SHA` 环境变量注入提交号。
pub fn version_line() -> String {
    format!(
        "version: {} - git: {}",
        env!("CARGO_PKG_VERSION"),
        option_env!("GIT_SHA").unwrap_or("unknown")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_short_flags() {
        let cli = Cli::try_parse_from([
            "orbit-tracker",
            "-t",
            "localhost:9851",
            "-i",
            "10",
            "-s",
            "5000",
            "-l",
            "33.4484,112.0740",
        ])
        .unwrap();
        assert!(!cli.version);
        let input = cli.into_input();
        assert_eq!(input.store_address.as_deref(), Some("localhost:9851"));
        assert_eq!(input.poll_interval_seconds.as_deref(), Some("10"));
        assert_eq!(input.geofence_radius_m.as_deref(), Some("5000"));
        assert_eq!(input.geofence_location.as_deref(), Some("33.4484,112.0740"));
        assert!(input.position_url.is_none());
    }

    #[test]
    fn accepts_negative_location() {
        let cli = Cli::try_parse_from(["orbit-tracker", "-l", "-33.86,151.2"]).unwrap();
        assert_eq!(cli.location.as_deref(), Some("-33.86,151.2"));
    }

    #[test]
    fn version_flag() {
        let cli = Cli::try_parse_from(["orbit-tracker", "-v"]).unwrap();
        assert!(cli.version);
        assert!(version_line().starts_with("version: "));
    }

    #[test]
    fn help_is_reported_as_display_help() {
        let err = Cli::try_parse_from(["orbit-tracker", "-h"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }
}

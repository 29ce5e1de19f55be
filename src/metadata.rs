// src/metadata.rs

//! Plugin metadata advertised to the host CLI.

use serde::Serialize;

pub const PLUGIN_NAME: &str = "Run and Wait";

pub const RUN_AND_WAIT_HELP: &str = "Run task, and wait until complete.";
pub const WAIT_HELP: &str = "Wait for an existing task";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VersionType {
    pub major: u32,
    pub minor: u32,
    pub build: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct Usage {
    pub usage: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PluginCommand {
    pub name: String,
    pub help_text: String,
    pub usage_details: Usage,
}

#[derive(Debug, Clone, Serialize)]
pub struct PluginMetadata {
    pub name: String,
    pub version: VersionType,
    pub min_cli_version: VersionType,
    pub commands: Vec<PluginCommand>,
}

/// Metadata describing this plugin and the commands it contributes.
pub fn plugin_metadata() -> PluginMetadata {
    PluginMetadata {
        name: PLUGIN_NAME.to_string(),
        version: VersionType {
            major: 0,
            minor: 3,
            build: 0,
        },
        min_cli_version: VersionType {
            major: 6,
            minor: 7,
            build: 0,
        },
        commands: vec![
            PluginCommand {
                name: "run-and-wait".to_string(),
                help_text: RUN_AND_WAIT_HELP.to_string(),
                usage_details: Usage {
                    usage: "run-and-wait\n   cf run-and-wait APPNAME \"cmd to run\"".to_string(),
                },
            },
            PluginCommand {
                name: "wait".to_string(),
                help_text: WAIT_HELP.to_string(),
                usage_details: Usage {
                    usage: "wait\n   cf wait APPNAME TASK".to_string(),
                },
            },
        ],
    }
}

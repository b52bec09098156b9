//! Process configuration, fixed at startup.
//!
//! Values come from command-line flags, then environment variables (a `.env`
//! file is loaded by the binary before parsing), then defaults.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::user::IdPolicy;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Serve a JSON-file user collection over HTTP", long_about = None)]
pub struct Config {
    /// Interface to bind.
    #[arg(long, env = "USER_STORE_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Backing JSON file holding the user collection.
    #[arg(long, env = "USERS_FILE_PATH", default_value = "data/users.json")]
    pub users_file_path: PathBuf,

    /// How ids of new users are assigned.
    #[arg(long, env = "USERS_ID_POLICY", value_enum, default_value_t = IdPolicyArg::Count)]
    pub id_policy: IdPolicyArg,
}

#[derive(Copy, Clone, ValueEnum, Debug, PartialEq, Eq)]
pub enum IdPolicyArg {
    /// Number of users + 1.
    Count,
    /// Largest existing id + 1.
    MaxPlusOne,
}

impl From<IdPolicyArg> for IdPolicy {
    fn from(arg: IdPolicyArg) -> Self {
        match arg {
            IdPolicyArg::Count => IdPolicy::Count,
            IdPolicyArg::MaxPlusOne => IdPolicy::MaxPlusOne,
        }
    }
}

impl Config {
    /// `host:port` as a bind address string.
    pub fn bind_addr(&self) -> String {
        match self.host.parse::<std::net::IpAddr>() {
            Ok(ip) => SocketAddr::new(ip, self.port).to_string(),
            Err(_) => format!("{}:{}", self.host, self.port),
        }
    }
}

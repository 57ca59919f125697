//! Pure configuration behavior; env-var parsing is covered by the
//! defaults path since the test environment sets no WORDGAME_* vars.

use std::time::Duration;

use wordgame_server::config::{Config, ListenMode};

#[test]
fn local_argument_selects_the_unix_socket() {
    assert_eq!(ListenMode::from_arg(Some("local")), ListenMode::Unix);
    assert_eq!(ListenMode::from_arg(Some("network")), ListenMode::Tcp);
    assert_eq!(ListenMode::from_arg(None), ListenMode::Tcp);
}

#[test]
fn defaults_match_the_documented_values() {
    let config = Config::from_env(ListenMode::Tcp).unwrap();

    assert_eq!(config.socket_addr_string(), "0.0.0.0:9999");
    assert_eq!(config.secret, b"mysecretpw");
    assert_eq!(config.status_port, 8080);
    assert_eq!(config.max_clients, 1024);
    assert_eq!(config.idle_timeout(), None);
}

#[test]
fn nonzero_idle_timeout_is_enabled() {
    let mut config = Config::from_env(ListenMode::Tcp).unwrap();
    config.idle_timeout_secs = 30;
    assert_eq!(config.idle_timeout(), Some(Duration::from_secs(30)));
}

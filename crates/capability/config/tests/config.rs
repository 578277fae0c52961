use outage_config::{AppConfig, ConfigError};

#[test]
fn load_config_from_env() {
    // Rust 2024 中 set_var 需要显式标注 unsafe（测试进程内可控）。
    unsafe {
        std::env::set_var("OUTAGE_DATA_BASE_URL", "http://127.0.0.1:18081/");
        std::env::set_var("OUTAGE_AUTH_TOKEN", "token-1");
        std::env::set_var("OUTAGE_HTTP_ADDR", "127.0.0.1:9091");
        std::env::set_var("OUTAGE_TIMEOUT_SECONDS", "15");
    }

    let config = AppConfig::from_env().expect("config");
    assert_eq!(config.http_addr, "127.0.0.1:9091");
    assert_eq!(config.data_base_url, "http://127.0.0.1:18081");
    assert_eq!(config.auth_token, "token-1");
    assert_eq!(config.timeout_seconds, 15);
    assert_eq!(config.landform_timeout_seconds, 10);

    // 同一进程内的环境变量是共享的，零超时校验放在同一个测试里顺序执行。
    for key in ["OUTAGE_TIMEOUT_SECONDS", "OUTAGE_LANDFORM_TIMEOUT_SECONDS"] {
        unsafe {
            std::env::set_var(key, "0");
        }
        match AppConfig::from_env() {
            Err(ConfigError::Invalid(name, value)) => {
                assert_eq!(name, key);
                assert_eq!(value, "0");
            }
            other => panic!("zero timeout accepted for {key}: {other:?}"),
        }
        unsafe {
            std::env::set_var(key, "10");
        }
    }
}

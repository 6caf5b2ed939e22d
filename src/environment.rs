use strum::{Display, EnumString};

/// Selected with `APP_ENVIRONMENT`; picks `config/{environment}.yaml`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumString, Display)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Environment {
    #[default]
    Development,
    Production,
    Test,
}

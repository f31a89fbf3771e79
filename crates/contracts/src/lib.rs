pub mod domain;

/// Порт backend по умолчанию; frontend ходит на тот же хост и этот порт
pub const DEFAULT_API_PORT: u16 = 3000;

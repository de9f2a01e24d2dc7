//! Tool-call handlers

pub mod i2c_ops;

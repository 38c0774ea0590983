//! Business flows that span the gateway and multiple tables

pub mod upgrade;

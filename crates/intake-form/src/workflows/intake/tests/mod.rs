mod common;
mod persistence;
mod store;

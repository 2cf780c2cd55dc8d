//! CLI command implementations

pub(crate) mod common;
pub(crate) mod ls;
pub(crate) mod run;

#[cfg(test)]
mod test_support;

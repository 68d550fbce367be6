// Each domain contains: mod.rs, types.rs and, when it has root fields, resolvers.rs

pub mod budget_groups;
pub mod expenses;
pub mod users;

pub mod albums;
pub mod arrange;
pub mod audit;
pub mod config;
pub mod files;
pub mod fsops;
pub mod migrate;
pub mod naming;
pub mod numbering;
pub mod paths;
pub mod plan;
pub mod projects;
pub mod sortownia;
pub mod warnings;

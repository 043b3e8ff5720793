pub mod eurostat;

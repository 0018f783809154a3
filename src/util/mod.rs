pub mod threshold_log;

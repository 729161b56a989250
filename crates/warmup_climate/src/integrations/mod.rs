pub mod warmup;

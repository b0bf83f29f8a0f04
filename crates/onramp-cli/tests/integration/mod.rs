mod config_flow;
mod hosted_attempts;

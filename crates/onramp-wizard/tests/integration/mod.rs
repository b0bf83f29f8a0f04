mod hosted_backend;
mod wizard_flow;

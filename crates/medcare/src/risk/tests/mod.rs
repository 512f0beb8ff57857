mod common;
mod guidance;
mod service;

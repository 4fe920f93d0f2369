pub mod console;
pub mod help;
pub mod realizer;
pub mod speech;

pub mod console;
pub mod prettyprint;

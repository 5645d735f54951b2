mod parser;
mod samples;

mod database;
mod samples;
mod scenarios;

//! Integration tests driving whole races through the session loop.

mod races;
mod scenarios;

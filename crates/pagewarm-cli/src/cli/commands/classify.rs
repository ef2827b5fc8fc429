//! `pagewarm classify` – print the quality tier for the given connection.

use pagewarm_core::connection::{self, ConnectionInfo};

pub fn run_classify(info: Option<ConnectionInfo>) {
    let tier = connection::classify(info.as_ref());
    println!("{tier}");
}

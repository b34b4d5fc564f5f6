use std::env;
use std::fs;

use cronidx::{CandidateFile, CronGroupIndexer, FileIndexer};

fn main() {
    let path = env::args().nth(1).expect("Missing cron_groups.xml path");
    let text = fs::read_to_string(&path).expect("Failed to read file");
    let file = CandidateFile::new(path, text);
    let groups = CronGroupIndexer.extract(&file, true);
    println!("Groups: {:?}", groups);
}

use std::io;

use env_logger;
use log;

use nway_merge::{merge, NWayMergerBuilder};

fn main() {
    env_logger::Builder::new().filter_level(log::LevelFilter::Debug).init();

    let lists = vec![vec![-5, 0, 5, 10, 15], vec![1, 2, 3], vec![7, 9, 11]];
    println!("{:?}", merge(&lists));

    let input = "3\n-5 0 5 10 15\n1 2 3\n7 9 11\n";
    let merger = NWayMergerBuilder::new().with_sorted_check(true).build();
    merger.merge_streams(input.as_bytes(), io::stdout().lock()).unwrap();
}

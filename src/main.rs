use std::path::PathBuf;

use clap::{command, Arg};
use context::Context;

mod context;
mod converter;
mod report;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let matches = command!()
        .args(&[
            Arg::new("article_dir")
                .help("Directory path of Hexo posts")
                .value_parser(clap::value_parser!(PathBuf))
                .default_value("source/_posts"),
            Arg::new("out_dir")
                .help("Directory path of Hugo posts. Existing files will be overwritten.")
                .value_parser(clap::value_parser!(PathBuf))
                .default_value("content/posts"),
            Arg::new("extension")
                .long("extension")
                .help("Extension of article files")
                .default_value("md"),
            Arg::new("report")
                .long("report")
                .help("Also write the summary as JSON to this path")
                .value_parser(clap::value_parser!(PathBuf)),
        ])
        .get_matches();

    let ctx = Context::new(
        matches
            .get_one::<PathBuf>("article_dir")
            .cloned()
            .unwrap_or_default(),
        matches
            .get_one::<PathBuf>("out_dir")
            .cloned()
            .unwrap_or_default(),
        matches
            .get_one::<String>("extension")
            .map_or("md", |ext| ext.trim_start_matches('.'))
            .to_string(),
    );

    let summary = converter::convert_all(&ctx);
    summary.print();

    if let Some(report_path) = matches.get_one::<PathBuf>("report") {
        report::write_report(report_path, &summary);
    }
}

use std::path::Path;

use anyhow::Context as _;
use log::{debug, error, info, warn};

use crate::{
    context::Context,
    report::{Failure, Summary},
};

use self::{data::HugoFrontMatter, front_matter::split_front_matter, walker::ArticleWalker};

mod data;
mod front_matter;
mod utils;
mod walker;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Outcome {
    Converted,
    // no front matter; nothing was written
    Skipped,
}

pub(crate) fn convert_file(article_path: &Path, out_path: &Path) -> anyhow::Result<Outcome> {
    let content = std::fs::read_to_string(article_path).context("while reading")?;

    let Some((header, body)) = split_front_matter(&content) else {
        return Ok(Outcome::Skipped);
    };
    let front_matter = HugoFrontMatter::from_hexo(header)?;
    debug!("{front_matter:?}");

    let mut out = front_matter.render();
    out.push_str(body);

    if let Some(parent) = out_path.parent() {
        fs_extra::dir::create_all(parent, false)
            .with_context(|| format!("while creating {parent:?}"))?;
    }
    std::fs::write(out_path, out).with_context(|| format!("while writing {out_path:?}"))?;

    Ok(Outcome::Converted)
}

// a failing article never stops the batch
pub(crate) fn convert_all(ctx: &Context) -> Summary {
    let mut summary = Summary::default();

    if !ctx.article_dir.is_dir() {
        warn!("{:?} is not a directory. nothing to convert.", ctx.article_dir);
    }

    for entry in ArticleWalker::new(&ctx.article_dir, &ctx.extension) {
        let article_path = match entry {
            Ok(path) => path,
            Err(e) => {
                error!("{:#}", e.error);
                summary.failed.push(Failure {
                    path: e.directory,
                    reason: format!("{:#}", e.error),
                });
                continue;
            }
        };
        let Some(out_path) = ctx.out_path_of(&article_path) else {
            // the walker only yields paths below article_dir
            continue;
        };
        let rel_path = article_path
            .strip_prefix(&ctx.article_dir)
            .unwrap_or(&article_path)
            .to_path_buf();

        println!("Converting: {}", rel_path.display());
        match convert_file(&article_path, &out_path)
            .with_context(|| format!("while converting {article_path:?}"))
        {
            Ok(Outcome::Converted) => {
                info!("{article_path:?} -> {out_path:?}");
                println!("  ✓ converted");
                summary.converted += 1;
            }
            Ok(Outcome::Skipped) => {
                warn!("{article_path:?} has no front matter. skipping...");
                println!("  ✗ skipped");
                summary.skipped.push(rel_path);
            }
            Err(e) => {
                error!("{e:#}");
                println!("  ✗ failed: {e:#}");
                summary.failed.push(Failure {
                    path: rel_path,
                    reason: format!("{e:#}"),
                });
            }
        }
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{fs, path::PathBuf};
    use tempfile::TempDir;

    const ARTICLE: &str = concat!(
        "---\n",
        "layout: post\n",
        "title: \"CS 61B: Intro\"\n",
        "date: 2025-10-24 15:30:00\n",
        "categories: ['cs-61b', 'notes']\n",
        "tags: [java]\n",
        "permalink: /cs-61b/00-intro/\n",
        "---\n",
        "\n# Intro\n\nkey: value is not front matter\n---\n",
    );

    fn setup() -> (TempDir, Context) {
        let temp = TempDir::new().unwrap();
        let ctx = Context::new(
            temp.path().join("source/_posts"),
            temp.path().join("content/posts"),
            "md".to_string(),
        );
        fs::create_dir_all(ctx.article_dir.join("cs-61b")).unwrap();
        (temp, ctx)
    }

    #[test]
    fn test_convert_file() {
        let (_temp, ctx) = setup();
        let article_path = ctx.article_dir.join("cs-61b/00-intro.md");
        let out_path = ctx.out_dir.join("cs-61b/00-intro.md");
        fs::write(&article_path, ARTICLE).unwrap();

        assert_eq!(
            convert_file(&article_path, &out_path).unwrap(),
            Outcome::Converted
        );
        assert_eq!(
            fs::read_to_string(&out_path).unwrap(),
            concat!(
                "---\n",
                "title: \"CS 61B: Intro\"\n",
                "date: 2025-10-24T15:30:00+08:00\n",
                "categories: [\"cs-61b\", \"notes\"]\n",
                "tags: [\"java\"]\n",
                "slug: cs-61b/00-intro\n",
                "draft: false\n",
                "---\n",
                "\n# Intro\n\nkey: value is not front matter\n---\n",
            )
        );
    }

    #[test]
    fn test_convert_file_without_front_matter_writes_nothing() {
        let (_temp, ctx) = setup();
        let article_path = ctx.article_dir.join("plain.md");
        let out_path = ctx.out_dir.join("plain.md");
        fs::write(&article_path, "# No header\n").unwrap();

        assert_eq!(
            convert_file(&article_path, &out_path).unwrap(),
            Outcome::Skipped
        );
        assert!(!out_path.exists());
        assert!(!ctx.out_dir.exists());
    }

    #[test]
    fn test_convert_file_rejects_bad_list() {
        let (_temp, ctx) = setup();
        let article_path = ctx.article_dir.join("broken.md");
        let out_path = ctx.out_dir.join("broken.md");
        for header in ["tags: ['a'", "tags: [java, 'data structures']", "categories: ['a' 'b']"] {
            fs::write(&article_path, format!("---\n{header}\n---\nbody\n")).unwrap();

            assert!(convert_file(&article_path, &out_path).is_err(), "{header}");
            assert!(!out_path.exists());
        }
    }

    #[test]
    fn test_convert_all() {
        let (_temp, ctx) = setup();
        fs::write(ctx.article_dir.join("cs-61b/00-intro.md"), ARTICLE).unwrap();
        fs::write(ctx.article_dir.join("hello.md"), "---\ndate: 2020-01-01 00:00:00\n---\nhi\n")
            .unwrap();
        fs::write(ctx.article_dir.join("plain.md"), "no header\n").unwrap();
        fs::write(ctx.article_dir.join("broken.md"), "---\ncategories: 'a']\n---\n").unwrap();
        fs::write(ctx.article_dir.join("image.png"), [0xff, 0xfe]).unwrap();
        fs::write(ctx.article_dir.join("latin1.md"), [b'-', b'-', b'-', b'\n', 0xe9]).unwrap();

        let summary = convert_all(&ctx);
        assert_eq!(summary.converted, 2);
        assert_eq!(summary.skipped, vec![PathBuf::from("plain.md")]);
        let mut failed: Vec<PathBuf> = summary.failed.iter().map(|f| f.path.clone()).collect();
        failed.sort();
        assert_eq!(
            failed,
            vec![PathBuf::from("broken.md"), PathBuf::from("latin1.md")]
        );
        assert_eq!(summary.not_converted(), 3);

        assert_eq!(
            fs::read_to_string(ctx.out_dir.join("hello.md")).unwrap(),
            "---\ntitle: \"Untitled\"\ndate: 2020-01-01T00:00:00+08:00\ndraft: false\n---\nhi\n"
        );
        assert!(ctx.out_dir.join("cs-61b/00-intro.md").is_file());
        assert!(!ctx.out_dir.join("plain.md").exists());
        assert!(!ctx.out_dir.join("broken.md").exists());
        assert!(!ctx.out_dir.join("image.png").exists());
    }

    #[test]
    fn test_convert_all_twice_is_stable() {
        let (_temp, ctx) = setup();
        fs::write(ctx.article_dir.join("cs-61b/00-intro.md"), ARTICLE).unwrap();

        let first = convert_all(&ctx);
        let out = fs::read_to_string(ctx.out_dir.join("cs-61b/00-intro.md")).unwrap();
        let second = convert_all(&ctx);

        assert_eq!(first.converted, 1);
        assert_eq!(second.converted, 1);
        assert!(second.failed.is_empty());
        assert_eq!(
            fs::read_to_string(ctx.out_dir.join("cs-61b/00-intro.md")).unwrap(),
            out
        );
    }

    #[test]
    fn test_convert_all_missing_article_dir() {
        let temp = TempDir::new().unwrap();
        let ctx = Context::new(
            temp.path().join("missing"),
            temp.path().join("out"),
            "md".to_string(),
        );
        let summary = convert_all(&ctx);
        assert_eq!(summary.converted, 0);
        assert_eq!(summary.not_converted(), 0);
    }
}

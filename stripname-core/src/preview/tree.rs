use super::{format_size, sorted_by_directory, DisplayOptions};
use crate::planner::{RenamePlan, RenamePlanEntry};
use nu_ansi_term::{Color as AnsiColor, Style};
use std::collections::BTreeMap;
use std::fmt::Write;
use std::path::{Path, PathBuf};

enum Node<'a> {
    Dir(&'a Path),
    File(&'a RenamePlanEntry),
}

struct TreeContext<'a> {
    files: BTreeMap<PathBuf, Vec<&'a RenamePlanEntry>>,
    children: BTreeMap<&'a Path, Vec<&'a Path>>,
    options: DisplayOptions,
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

fn file_label(entry: &RenamePlanEntry, use_color: bool) -> String {
    let size = format_size(entry.size);

    if !use_color {
        return if entry.is_change() {
            format!("{} → {}  ({})", entry.original, entry.candidate, size)
        } else {
            format!("{}  ({})", entry.original, size)
        };
    }

    let dim = Style::new().dimmed();
    if entry.hidden {
        dim.paint(format!("{}  ({})", entry.original, size)).to_string()
    } else if entry.is_change() {
        format!(
            "{} {} {}  {}",
            AnsiColor::Red.paint(&entry.original),
            dim.paint("→"),
            AnsiColor::Green.bold().paint(&entry.candidate),
            dim.paint(format!("({size})"))
        )
    } else {
        format!("{}  {}", entry.original, dim.paint(format!("({size})")))
    }
}

fn dir_label(name: &str, use_color: bool) -> String {
    if use_color {
        AnsiColor::Blue.bold().paint(format!("{name}/")).to_string()
    } else {
        format!("{name}/")
    }
}

fn render_dir<'a>(ctx: &TreeContext<'a>, dir: &'a Path, prefix: &str, output: &mut String) {
    let mut nodes: Vec<(String, Node<'a>)> = Vec::new();
    if let Some(entries) = ctx.files.get(dir) {
        nodes.extend(entries.iter().map(|e| (e.original.clone(), Node::File(*e))));
    }
    if let Some(subdirs) = ctx.children.get(&dir) {
        nodes.extend(subdirs.iter().map(|d| {
            let name = d
                .file_name()
                .map_or_else(|| d.display().to_string(), |n| n.to_string_lossy().into_owned());
            (name, Node::Dir(*d))
        }));
    }
    nodes.sort_by(|a, b| a.0.cmp(&b.0));

    let count = nodes.len();
    for (index, (name, node)) in nodes.into_iter().enumerate() {
        let last = index + 1 == count;
        let connector = if last { "└── " } else { "├── " };
        match node {
            Node::File(entry) => {
                writeln!(
                    output,
                    "{}{}{}",
                    prefix,
                    connector,
                    file_label(entry, ctx.options.use_color)
                )
                .unwrap();
            },
            Node::Dir(path) => {
                writeln!(
                    output,
                    "{}{}{}",
                    prefix,
                    connector,
                    dir_label(&name, ctx.options.use_color)
                )
                .unwrap();
                let child_prefix = format!("{}{}", prefix, if last { "    " } else { "│   " });
                render_dir(ctx, path, &child_prefix, output);
            },
        }
    }
}

/// Render plan as a directory tree with `original → proposed` per changed file
pub fn render_tree(plan: &RenamePlan, options: DisplayOptions) -> String {
    let mut children: BTreeMap<&Path, Vec<&Path>> = BTreeMap::new();
    for dir in &plan.directories {
        if *dir == plan.root {
            continue;
        }
        if let Some(parent) = dir.parent() {
            children.entry(parent).or_default().push(dir.as_path());
        }
    }

    let ctx = TreeContext {
        files: sorted_by_directory(plan, options.show_hidden),
        children,
        options,
    };

    let mut output = String::new();
    let root_label = plan.root.display().to_string();
    if options.use_color {
        writeln!(output, "{}", AnsiColor::Cyan.bold().paint(root_label)).unwrap();
    } else {
        writeln!(output, "{}", root_label).unwrap();
    }
    render_dir(&ctx, &plan.root, "", &mut output);

    let visible = plan.entries.len() - plan.hidden_count();
    let hidden = plan.hidden_count();
    writeln!(output).unwrap();
    writeln!(
        output,
        "{} of {} file{} will be renamed ({} hidden file{} left as-is)",
        plan.change_count(),
        visible,
        plural(visible),
        hidden,
        plural(hidden)
    )
    .unwrap();

    if !plan.warnings.is_empty() {
        writeln!(
            output,
            "{} warning{} while walking the tree",
            plan.warnings.len(),
            plural(plan.warnings.len())
        )
        .unwrap();
    }

    output
}

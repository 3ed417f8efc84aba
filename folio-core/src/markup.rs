//! HTML fragments for the subtrees that are mounted and unmounted at
//! runtime. Everything interpolated from content is escaped.

use crate::archive::{ArchiveStrip, ScrollDirection};
use crate::content::{Archive, Content, Project, ProjectDetail};
use crate::nav::NavItem;
use crate::physics::ToyKind;
use crate::reveal;
use crate::style::Style;

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn inline_style(style: &Style) -> String {
    style
        .css_properties()
        .iter()
        .map(|(property, value)| format!("{property}:{value};"))
        .collect()
}

/// Text block revealed word by word. `delay` (seconds) rides along in
/// `data-reveal` for the runtime.
pub fn reveal_text(text: &str, class: &str, delay: f64) -> String {
    let hidden = inline_style(&reveal::word_hidden());
    let words: String = reveal::split_words(text)
        .into_iter()
        .map(|w| {
            format!(
                r#"<span class="reveal-mask"><span class="word" style="{hidden}">{}</span></span>"#,
                escape(w)
            )
        })
        .collect();
    format!(r#"<div class="reveal {class}" data-reveal="{delay}">{words}</div>"#)
}

fn tags(items: &[String], class: &str) -> String {
    items
        .iter()
        .map(|t| format!(r#"<span class="{class}">{}</span>"#, escape(t)))
        .collect()
}

/// Static stack panel shown in info mode.
pub fn info_panel(content: &Content) -> String {
    let items: String = content
        .primary_stack
        .iter()
        .enumerate()
        .map(|(i, item)| {
            format!(
                r#"<li class="stack-item"><span class="stack-index">{:02}</span><span class="stack-name">{}</span><span class="stack-category">{}</span></li>"#,
                i + 1,
                escape(&item.name),
                escape(&item.category)
            )
        })
        .collect();
    format!(r#"<h2 class="stack-title">Technical Stack</h2><ul class="stack-list">{items}</ul>"#)
}

/// Absolutely positioned labels for one physics container. Transforms are
/// written per frame by the runtime.
pub fn toy_labels(labels: &[&str], kind: ToyKind) -> String {
    let class = match kind {
        ToyKind::Floating => "toy-label toy-label--primary",
        ToyKind::Falling => "toy-label toy-label--secondary",
    };
    labels
        .iter()
        .enumerate()
        .map(|(i, label)| {
            format!(
                r#"<div class="{class}" data-index="{i}" style="position:absolute;left:0;top:0;will-change:transform">{}</div>"#,
                escape(label)
            )
        })
        .collect()
}

/// Play-mode subtree: one zone per toy, tagged with `data-toy`.
pub fn play_panel(content: &Content) -> String {
    format!(
        concat!(
            r#"<div class="toy-zone toy-zone--floating" data-toy="floating">{}</div>"#,
            r#"<div class="toy-zone toy-zone--falling" data-toy="falling">{}</div>"#
        ),
        toy_labels(&content.primary_labels(), ToyKind::Floating),
        toy_labels(&content.secondary_labels(), ToyKind::Falling),
    )
}

pub fn nav_items(items: &[NavItem]) -> String {
    items
        .iter()
        .map(|item| {
            format!(
                r##"<a href="#{anchor}" class="nav-menu-item" data-nav="{anchor}">{}</a>"##,
                item.label(),
                anchor = item.anchor()
            )
        })
        .collect()
}

fn project_card(index: usize, project: &Project) -> String {
    let grey = if project.coming_soon { " grayscale" } else { "" };
    let active = if project.has_video() {
        format!(
            r#"<video class="card-active{grey}" data-video="{index}" src="{}" muted loop playsinline></video>"#,
            escape(&project.active)
        )
    } else {
        format!(
            r#"<img class="card-active{grey}" src="{}" alt="">"#,
            escape(&project.active)
        )
    };
    format!(
        concat!(
            r#"<article class="project-card" data-card="{index}">"#,
            r#"<div class="card-media" data-media="{index}"><img class="card-preview{grey}" src="{preview}" alt="">{active}</div>"#,
            r#"<div class="card-body"><span class="card-id">{id}</span><h3>{title}</h3><p>{desc}</p>"#,
            r#"<div class="card-tech">{tech}</div>"#,
            r#"<a href="{demo}" target="_blank" rel="noopener noreferrer">Live</a>"#,
            r#"<a href="{repo}" target="_blank" rel="noopener noreferrer">Source</a></div></article>"#
        ),
        index = index,
        grey = grey,
        preview = escape(&project.preview),
        active = active,
        id = escape(&project.id),
        title = escape(&project.title),
        desc = escape(&project.description),
        tech = tags(&project.tech, "tag"),
        demo = escape(&project.demo),
        repo = escape(&project.repo),
    )
}

pub fn project_cards(content: &Content) -> String {
    content
        .projects
        .iter()
        .enumerate()
        .map(|(i, p)| project_card(i, p))
        .collect()
}

/// Artwork strip with its step buttons and the experiment logs.
pub fn visual_records(archive: &Archive, strip: &ArchiveStrip) -> String {
    let records: String = archive
        .records
        .iter()
        .enumerate()
        .map(|(i, r)| {
            format!(
                concat!(
                    r#"<div class="{class}" data-record="{i}">"#,
                    r#"<div class="record-frame" style="aspect-ratio:{ratio}"><img src="{img}" alt="{title}"></div>"#,
                    r#"<div class="record-caption"><h3>{title}</h3><span>// {purpose}</span></div></div>"#
                ),
                class = strip.focus(i).class(),
                i = i,
                ratio = escape(&r.ratio),
                img = escape(&r.img),
                title = escape(&r.title),
                purpose = escape(&r.purpose),
            )
        })
        .collect();
    let experiments: String = archive
        .experiments
        .iter()
        .enumerate()
        .map(|(i, e)| {
            format!(
                concat!(
                    r#"<div class="experiment"><span class="log-ref">LOG_REF: 00{n}</span>"#,
                    r#"<img src="{img}" alt="{title}"><h4>{title}</h4><span class="log-kind">{kind}</span></div>"#
                ),
                n = i + 1,
                img = escape(&e.img),
                title = escape(&e.title),
                kind = escape(&e.kind),
            )
        })
        .collect();
    let button = |d: ScrollDirection, label: &str| {
        format!(
            r#"<button class="archive-step" data-archive-scroll="{}">{label}</button>"#,
            d.attr()
        )
    };
    format!(
        concat!(
            r#"<section class="archive"><header><h2>The Soul // Visual_Records</h2>{left}{right}</header>"#,
            r#"<div class="{strip_class}" data-archive-strip><div class="archive-track" data-archive-track style="{track}">{records}</div></div>"#,
            r#"<button class="archive-logs-toggle" data-archive-logs><span>{label}</span> Experimental_Logs // {count} entries</button>"#,
            r#"<div class="{logs_class}" data-archive-log-list>{experiments}</div></section>"#
        ),
        left = button(ScrollDirection::Left, "&lt;"),
        right = button(ScrollDirection::Right, "&gt;"),
        strip_class = strip.strip_class(),
        track = inline_style(&ArchiveStrip::entry().current()),
        records = records,
        label = strip.logs_label(),
        count = archive.experiments.len(),
        logs_class = strip.logs_class(),
        experiments = experiments,
    )
}

pub fn about_modal(content: &Content, strip: &ArchiveStrip) -> String {
    let principles: String = content
        .principles
        .iter()
        .map(|p| {
            format!(
                r#"<div class="principle"><h3>{}</h3><p>{}</p></div>"#,
                escape(&p.title),
                escape(&p.desc)
            )
        })
        .collect();
    let domains: String = content
        .domains
        .iter()
        .map(|d| {
            format!(
                r#"<div class="domain"><span class="domain-label">{}</span><h3>{}</h3><p>{}</p><p class="domain-output">{}</p></div>"#,
                escape(&d.label),
                escape(&d.title),
                escape(&d.influence),
                escape(&d.output)
            )
        })
        .collect();
    format!(
        concat!(
            r#"<button class="modal-back" data-close="about">Back</button>"#,
            r#"<header>{owner}</header>"#,
            r#"<section>{principles_title}<div class="principles">{principles}</div></section>"#,
            r#"<section>{domains_title}<div class="domains">{domains}</div></section>"#,
            "{archive}"
        ),
        owner = reveal_text(&content.owner, "about-owner", 0.0),
        principles_title = reveal_text("Execution_Principles", "about-heading", 0.0),
        principles = principles,
        domains_title = reveal_text("Synthesized Domains", "about-heading", 0.1),
        domains = domains,
        archive = visual_records(&content.archive, strip),
    )
}

fn project_detail(index: usize, detail: &ProjectDetail, expanded: bool) -> String {
    let state = if expanded { "expanded" } else { "collapsed" };
    let icon = if expanded { "-" } else { "+" };
    let live = match &detail.live {
        Some(url) => format!(
            r#"<a class="detail-live" href="{}" target="_blank" rel="noopener noreferrer">Live</a>"#,
            escape(url)
        ),
        None => r#"<span class="detail-live detail-live--soon">Coming soon</span>"#.to_string(),
    };
    let screens: String = detail
        .screens
        .iter()
        .map(|s| format!(r#"<img src="{}" alt="" loading="lazy">"#, escape(s)))
        .collect();
    let deep: String = detail
        .deep_tech
        .iter()
        .map(|g| {
            format!(
                r#"<div class="tool-group"><h4>{}</h4>{}</div>"#,
                escape(&g.category),
                tags(&g.tools, "tool")
            )
        })
        .collect();
    let showcase = match &detail.video {
        Some(src) => format!(
            concat!(
                r#"<div class="showcase"><h5>Video_Showcase // {id}</h5>"#,
                r#"<video class="showcase-video" autoplay loop muted playsinline><source src="{src}" type="video/mp4"></video></div>"#
            ),
            id = escape(&detail.id),
            src = escape(src),
        ),
        None => String::new(),
    };
    format!(
        concat!(
            r#"<div class="project-entry {state}" data-project="{index}">"#,
            r#"<button class="project-toggle" data-toggle="{index}"><span>{id}</span><h3>{title}</h3><span class="toggle-icon">{icon}</span></button>"#,
            r#"<div class="project-body"><p class="intent">{intent}</p><div class="tags">{tech}</div>{live}"#,
            r#"<a href="{github}" target="_blank" rel="noopener noreferrer">Source</a>"#,
            r#"<div class="screens">{screens}</div>"#,
            r#"<dl><dt>Problem</dt><dd>{problem}</dd><dt>Decision</dt><dd>{decision}</dd><dt>Outcome</dt><dd>{outcome}</dd></dl>"#,
            r#"<div class="deep-tech">{deep}</div>{showcase}</div></div>"#
        ),
        state = state,
        index = index,
        id = escape(&detail.id),
        title = escape(&detail.title),
        icon = icon,
        intent = escape(&detail.intent),
        tech = tags(&detail.tech, "tag"),
        live = live,
        github = escape(&detail.github),
        screens = screens,
        problem = escape(&detail.problem),
        decision = escape(&detail.decision),
        outcome = escape(&detail.outcome),
        deep = deep,
        showcase = showcase,
    )
}

pub fn projects_modal(content: &Content, expanded: Option<usize>) -> String {
    let entries: String = content
        .details
        .iter()
        .enumerate()
        .map(|(i, d)| project_detail(i, d, expanded == Some(i)))
        .collect();
    format!(
        concat!(
            r#"<button class="modal-back" data-close="projects">Back</button>"#,
            r#"<header><h1>Selected Archive</h1><p>Total_Entries: {count}</p></header>"#,
            r#"<div class="project-list">{entries}</div>"#
        ),
        count = content.details.len(),
        entries = entries,
    )
}

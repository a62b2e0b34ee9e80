//! Markdown rendering of the assembled report
//!
//! Pure formatting over the core report structure. The category
//! legend is derived from the configured rule set so the documented
//! criteria can never drift from actual classification behavior.

use podmix_core::{pct, NodeReport, Report, RuleSet, FALLBACK_CATEGORY};

pub fn to_markdown(report: &Report, rules: &RuleSet) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push("# Pod report by node (per node pool) + category mix".to_string());
    lines.push(String::new());
    lines.push(format!(
        "- Generated: `{}`",
        report.generated_at.format("%Y-%m-%d %H:%M:%SZ")
    ));
    lines.push(format!("- Kubernetes context: `{}`", report.context));
    lines.push(String::new());

    lines.push("## Category criteria".to_string());
    for (category, patterns) in rules.legend() {
        let shown: Vec<String> = patterns.iter().map(|p| format!("`{p}`")).collect();
        lines.push(format!(
            "- `{}`: namespace matches any of: {}",
            category,
            shown.join(", ")
        ));
    }
    lines.push(format!("- `{FALLBACK_CATEGORY}`: anything else"));
    lines.push(String::new());
    lines.push("---".to_string());
    lines.push(String::new());

    for pool in &report.pools {
        lines.push(format!("## Node Pool: `{}`", pool.name));
        lines.push(String::new());
        lines.push(format!("- ID: `{}`", pool.id));
        lines.push(format!("- Nodes (nodeName): {}", pool.nodes.len()));
        lines.push(String::new());

        for node in &pool.nodes {
            render_node(&mut lines, node, rules);
        }

        lines.push("### Node pool summary".to_string());
        lines.push(String::new());
        if pool.total_active == 0 {
            lines.push("- No active pods on the listed nodes (or no nodeName matches).".to_string());
            lines.push(String::new());
        } else {
            lines.push("| Category | Pods | % of pool |".to_string());
            lines.push("|---|---:|---:|".to_string());
            for category in rules.display_categories() {
                let count = pool.categories.get(category);
                lines.push(format!(
                    "| `{}` | {} | {:.1}% |",
                    category,
                    count,
                    pct(count, pool.total_active)
                ));
            }
            lines.push(String::new());
            lines.push(format!(
                "- Total active (non-terminal) pods in the pool: **{}**",
                pool.total_active
            ));
            lines.push(String::new());
        }

        lines.push("---".to_string());
        lines.push(String::new());
    }

    lines.join("\n")
}

fn render_node(lines: &mut Vec<String>, node: &NodeReport, rules: &RuleSet) {
    lines.push(format!("### Node: `{}`", node.node));
    lines.push(String::new());

    let Some(agg) = &node.aggregate else {
        let error = node.error.as_deref().unwrap_or("unknown error");
        lines.push(format!("- Error: `{error}`"));
        lines.push(String::new());
        return;
    };

    if agg.total_active == 0 {
        lines.push("- Active pods: *(no matches / no active pods)*".to_string());
        lines.push(String::new());
        return;
    }

    lines.push("**Category mix (active pods):**".to_string());
    lines.push(String::new());
    lines.push("| Category | Pods | % |".to_string());
    lines.push("|---|---:|---:|".to_string());
    for category in rules.display_categories() {
        let count = agg.categories.get(category);
        lines.push(format!(
            "| `{}` | {} | {:.1}% |",
            category,
            count,
            pct(count, agg.total_active)
        ));
    }
    lines.push(String::new());
    lines.push(format!(
        "- Total active (non-terminal) pods: **{}**",
        agg.total_active
    ));
    lines.push(String::new());

    lines.push("| Namespace | Active pods | Category | % of node |".to_string());
    lines.push("|---|---:|---|---:|".to_string());
    for (namespace, count) in &agg.namespace_counts {
        lines.push(format!(
            "| `{}` | {} | `{}` | {:.1}% |",
            namespace,
            count,
            rules.classify(namespace),
            pct(*count, agg.total_active)
        ));
    }
    lines.push(String::new());
}

//! Human-readable summary of a resolved configuration

use deployer_meta::StackSpec;

use crate::config::ResolvedConfiguration;

const RULE: &str = "============================================================";

/// Render the deployment header and the active stack.
pub fn render(config: &ResolvedConfiguration) -> String {
    let run = &config.run;
    let mut lines = vec![
        RULE.to_string(),
        "Target Stack Deployment Information".to_string(),
        RULE.to_string(),
        field("name", &config.global.name),
        field("env", config.env()),
        field(
            "timeout",
            &format!("{:.0} min", run.timeout.as_secs_f64() / 60.0),
        ),
        field(
            "polling-interval",
            &format!("{:.0} sec", config.polling_interval().as_secs_f64()),
        ),
        field("assume role", run.assume_role.as_deref().unwrap_or_default()),
        field("extra tags", run.extra_tags.as_deref().unwrap_or_default()),
    ];
    if let Some(region) = &run.region {
        lines.push(field("region", region));
    }
    lines.push(RULE.to_string());
    lines.push("Stack".to_string());
    lines.push(RULE.to_string());

    match config.active_stack() {
        Some(stack) => lines.extend(render_stack(stack)),
        None => lines.push(format!("[ {} ] not found in manifest", run.stack)),
    }
    lines.push(RULE.to_string());

    lines.join("\n")
}

fn render_stack(stack: &StackSpec) -> Vec<String> {
    let mut lines = vec![
        format!("[ {} ]", stack.stack),
        field("Account", &stack.account),
        field("Environment", &stack.env),
        field("IAM Instance Profile", &stack.iam_instance_profile),
        field("Ansible tags", &stack.ansible_tags),
        field("Capacity", &stack.capacity.to_string()),
    ];

    if let Some(policy) = &stack.mixed_instances_policy {
        lines.push("MixedInstancesPolicy".to_string());
        lines.push(item("Enabled", &policy.enabled.to_string()));
        lines.push(item("Override", &policy.override_instance_types.join(", ")));
        lines.push(item(
            "OnDemandPercentage",
            &policy.on_demand_percentage.to_string(),
        ));
        lines.push(item(
            "SpotAllocationStrategy",
            policy.effective_allocation_strategy(),
        ));
        lines.push(item(
            "SpotInstancePools",
            &policy.spot_instance_pools.to_string(),
        ));
        lines.push(item(
            "SpotMaxPrice",
            policy.spot_max_price.as_deref().unwrap_or_default(),
        ));
    }

    lines.push("Regions".to_string());
    for region in &stack.regions {
        let ami = region.ami_id.as_deref().unwrap_or("(global)");
        lines.push(format!(
            "- {:<18} {} {}",
            region.region, region.instance_type, ami
        ));
    }
    lines
}

fn field(label: &str, value: &str) -> String {
    format!("{label:<24}: {value}")
}

fn item(label: &str, value: &str) -> String {
    format!("- {label:<22}: {value}")
}

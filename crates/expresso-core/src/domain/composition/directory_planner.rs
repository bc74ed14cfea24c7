//! Directory layout for a new project.

use crate::domain::{
    capabilities::api_style_def,
    entities::{configuration::ProjectConfiguration, project_structure::DirectoryPlan},
};

/// Derives which directories a configuration needs.
pub struct DirectoryPlanner;

impl DirectoryPlanner {
    /// Pure function of the configuration: no I/O, same input gives the
    /// same ordered output.
    pub fn plan(config: &ProjectConfiguration) -> DirectoryPlan {
        let mut plan = DirectoryPlan::new();
        for dir in api_style_def(config.api_style()).directories {
            plan.push(*dir);
        }
        plan
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ApiStyle, Language};

    fn config(style: ApiStyle) -> ProjectConfiguration {
        ProjectConfiguration::builder("demo")
            .api_style(style)
            .build()
            .unwrap()
    }

    fn paths(plan: &DirectoryPlan) -> Vec<&str> {
        plan.iter().map(|p| p.as_str()).collect()
    }

    #[test]
    fn rest_plan_has_six_base_directories() {
        let plan = DirectoryPlanner::plan(&config(ApiStyle::Rest));
        assert_eq!(
            paths(&plan),
            vec![
                "src",
                "src/routes",
                "src/controllers",
                "src/middlewares",
                "src/utils",
                "src/config",
            ]
        );
    }

    #[test]
    fn graphql_plan_replaces_routing_layers() {
        let plan = DirectoryPlanner::plan(&config(ApiStyle::GraphQl));
        let dirs = paths(&plan);
        assert!(!dirs.contains(&"src/routes"));
        assert!(!dirs.contains(&"src/controllers"));
        assert!(dirs.contains(&"src/middlewares"));
        assert!(dirs.contains(&"src/graphql/schemas"));
        assert!(dirs.contains(&"src/graphql/resolvers"));
    }

    #[test]
    fn plan_is_deterministic() {
        let cfg = ProjectConfiguration::builder("demo")
            .language(Language::TypeScript)
            .api_style(ApiStyle::GraphQl)
            .build()
            .unwrap();
        assert_eq!(DirectoryPlanner::plan(&cfg), DirectoryPlanner::plan(&cfg));
    }

    #[test]
    fn language_does_not_change_layout() {
        let js = config(ApiStyle::Rest);
        let ts = ProjectConfiguration::builder("demo")
            .language(Language::TypeScript)
            .build()
            .unwrap();
        assert_eq!(DirectoryPlanner::plan(&js), DirectoryPlanner::plan(&ts));
    }
}

//! The generated server's `src/index.{js,ts}`.
//!
//! The program is assembled from two ordered statement lists (imports and
//! setup), one request-handling block chosen by the API style, and the
//! listen block. The result is final program text: nothing is templated
//! after this point.

use crate::domain::{
    capabilities::api_style_def,
    entities::{configuration::ProjectConfiguration, project_structure::FileArtifact},
    value_objects::{ApiStyle, Language},
};

const GREETING: &str = "Happy Coding 🚀";

/// Derives the application's main source file.
pub struct EntryPointComposer;

impl EntryPointComposer {
    pub fn path(language: Language) -> String {
        format!("src/index.{}", language.file_extension())
    }

    pub fn compose(config: &ProjectConfiguration) -> FileArtifact {
        let language = config.language();

        let mut imports = vec!["import express from 'express';".to_string()];
        let mut setup = vec![
            "const app = express();".to_string(),
            "app.use(express.json());".to_string(),
        ];

        if config.use_cors() {
            imports.push("import cors from 'cors';".into());
            setup.push("app.use(cors({ origin: '*', credentials: true }));".into());
        }

        if config.api_style() == ApiStyle::GraphQl {
            imports.push(apollo_import(language).into());
        }

        if config.use_env_file() {
            imports.push("import dotenv from 'dotenv';".into());
            setup.push("dotenv.config();".into());
        }

        let handler = match config.api_style() {
            ApiStyle::Rest => rest_handler(),
            ApiStyle::GraphQl => graphql_bootstrap(language),
        };

        let sections = [
            imports.join("\n"),
            setup.join("\n"),
            handler,
            listen_block(config),
        ];

        let mut content = sections.join("\n\n");
        content.push('\n');

        FileArtifact::new(Self::path(language).as_str(), content)
    }
}

fn apollo_import(language: Language) -> &'static str {
    match language {
        Language::JavaScript => r#"import { ApolloServer } from "apollo-server-express";"#,
        Language::TypeScript => r#"import {ApolloServer, gql } from "apollo-server-express";"#,
    }
}

fn rest_handler() -> String {
    format!(
        "app.use(\"/\", (req, res) => {{\n    res.send(\"{GREETING}\");\n}});"
    )
}

fn graphql_bootstrap(language: Language) -> String {
    // TypeScript gets the `gql` tag so the schema is parsed at load time.
    let open = match language {
        Language::JavaScript => "`",
        Language::TypeScript => "gql`",
    };

    format!(
        "const typeDefs = {open}
  type Query {{
    getResponse: String
  }}
`;

const resolvers = {{
  Query: {{
    getResponse: () => \"{GREETING}\",
  }},
}};

const apolloServer = new ApolloServer({{
  typeDefs,
  resolvers,
}});

await apolloServer.start();
apolloServer.applyMiddleware({{ app }});"
    )
}

fn listen_block(config: &ProjectConfiguration) -> String {
    let path = api_style_def(config.api_style()).listen_path;
    format!(
        "const port = process.env.PORT || {port};
app.listen(port, () => {{
    console.log(`Express running → On http://localhost:${{port}}{path} 🚀`);
}});",
        port = config.port(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(
        language: Language,
        style: ApiStyle,
        cors: bool,
        env: bool,
    ) -> FileArtifact {
        let cfg = ProjectConfiguration::builder("demo")
            .language(language)
            .api_style(style)
            .cors(cors)
            .env_file(env)
            .port(4000)
            .build()
            .unwrap();
        EntryPointComposer::compose(&cfg)
    }

    #[test]
    fn extension_follows_language() {
        let js = build(Language::JavaScript, ApiStyle::Rest, true, true);
        let ts = build(Language::TypeScript, ApiStyle::Rest, true, true);
        assert_eq!(js.path.as_str(), "src/index.js");
        assert_eq!(ts.path.as_str(), "src/index.ts");
    }

    #[test]
    fn always_imports_express_and_parses_json() {
        let file = build(Language::JavaScript, ApiStyle::Rest, false, false);
        assert!(file.content.starts_with("import express from 'express';"));
        assert!(file.content.contains("app.use(express.json());"));
        assert!(!file.content.contains("cors"));
        assert!(!file.content.contains("dotenv"));
    }

    #[test]
    fn cors_allows_all_origins_with_credentials() {
        let file = build(Language::JavaScript, ApiStyle::Rest, true, false);
        assert!(file.content.contains("import cors from 'cors';"));
        assert!(
            file.content
                .contains("app.use(cors({ origin: '*', credentials: true }));")
        );
    }

    #[test]
    fn env_file_loads_dotenv() {
        let file = build(Language::JavaScript, ApiStyle::Rest, false, true);
        assert!(file.content.contains("import dotenv from 'dotenv';"));
        assert!(file.content.contains("dotenv.config();"));
    }

    #[test]
    fn exactly_one_handler_mechanism() {
        for language in [Language::JavaScript, Language::TypeScript] {
            let rest = build(language, ApiStyle::Rest, true, true).content;
            assert!(rest.contains("app.use(\"/\""));
            assert!(!rest.contains("ApolloServer"));

            let gql = build(language, ApiStyle::GraphQl, true, true).content;
            assert!(gql.contains("new ApolloServer"));
            assert!(gql.contains("apolloServer.applyMiddleware({ app });"));
            assert!(!gql.contains("app.use(\"/\""));

            for content in [rest, gql] {
                assert_eq!(content.matches("app.listen(port").count(), 1);
            }
        }
    }

    #[test]
    fn graphql_import_depends_on_language() {
        let js = build(Language::JavaScript, ApiStyle::GraphQl, false, false).content;
        let ts = build(Language::TypeScript, ApiStyle::GraphQl, false, false).content;

        assert!(js.contains(r#"import { ApolloServer } from "apollo-server-express";"#));
        assert!(js.contains("const typeDefs = `"));
        assert!(ts.contains(r#"import {ApolloServer, gql } from "apollo-server-express";"#));
        assert!(ts.contains("const typeDefs = gql`"));
    }

    #[test]
    fn listen_reads_env_then_falls_back_to_port() {
        let file = build(Language::JavaScript, ApiStyle::Rest, false, false);
        assert!(file.content.contains("const port = process.env.PORT || 4000;"));
        assert!(file.content.contains("http://localhost:${port} 🚀"));
    }

    #[test]
    fn graphql_listen_log_has_suffix() {
        let file = build(Language::JavaScript, ApiStyle::GraphQl, false, false);
        assert!(file.content.contains("http://localhost:${port}/graphql 🚀"));
    }

    #[test]
    fn imports_precede_setup() {
        let file = build(Language::TypeScript, ApiStyle::GraphQl, true, true).content;
        let last_import = file.rfind("import ").unwrap();
        let app = file.find("const app = express();").unwrap();
        assert!(last_import < app);
    }
}

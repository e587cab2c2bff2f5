//! Startup wiring: config, judge agent, whitelist, game.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use rand::SeedableRng;
use rand::rngs::StdRng;
use recipe_core::config::JudgeConfig;
use recipe_core::{GameConfig, RecipeGame};
use recipe_infrastructure::{ConfigStorage, WhitelistLoader, WhitelistSource};
use recipe_interaction::OpenAIJudgeAgent;
use tracing::info;

use crate::Cli;

/// Everything the REPL needs for one process.
pub struct App {
    pub game: RecipeGame,
    pub rng: StdRng,
}

impl App {
    pub async fn bootstrap(cli: &Cli) -> Result<Self> {
        let config = load_config(cli)?;

        let agent = build_agent(cli, &config)?;
        info!(model = agent.model(), "judge agent ready");

        let mut game = RecipeGame::new(&config, Arc::new(agent))
            .context("Invalid game configuration")?;

        if let Some(location) = cli.whitelist.as_deref().or(config.whitelist.as_deref()) {
            let loader = WhitelistLoader::new(WhitelistSource::parse(location));
            let whitelist = loader
                .load()
                .await
                .with_context(|| format!("Failed to load ingredient whitelist from {location}"))?;
            game = game.with_whitelist(whitelist);
        }

        let rng = match cli.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self { game, rng })
    }
}

fn load_config(cli: &Cli) -> Result<GameConfig> {
    let config = match &cli.config {
        Some(path) => ConfigStorage::with_path(path.clone()).load_required(),
        None => ConfigStorage::new()?.load(),
    };
    config.context("Failed to load config.toml")
}

fn build_agent(cli: &Cli, config: &GameConfig) -> Result<OpenAIJudgeAgent> {
    let mut agent = OpenAIJudgeAgent::try_from_env()?
        .with_base_url(config.judge.base_url.as_str())
        .with_timeout(Duration::from_secs(config.judge.timeout_secs.max(1)));

    if let Some(model) = model_override(cli.model.as_deref(), &config.judge) {
        agent = agent.with_model(model);
    }
    Ok(agent)
}

/// `--model` wins, then `judge.model` from config.toml. `None` keeps
/// whatever secret.json or `OPENAI_MODEL_NAME` selected.
fn model_override(cli_model: Option<&str>, judge: &JudgeConfig) -> Option<String> {
    cli_model
        .map(str::to_string)
        .or_else(|| judge.model.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn judge_with(model: Option<&str>) -> JudgeConfig {
        JudgeConfig {
            model: model.map(str::to_string),
            ..JudgeConfig::default()
        }
    }

    #[test]
    fn test_cli_model_wins() {
        let judge = judge_with(Some("gpt-4o-mini"));
        assert_eq!(
            model_override(Some("gpt-4o"), &judge).as_deref(),
            Some("gpt-4o")
        );
    }

    #[test]
    fn test_config_model_named_like_the_default_still_overrides() {
        let judge = judge_with(Some("gpt-3.5-turbo"));
        assert_eq!(
            model_override(None, &judge).as_deref(),
            Some("gpt-3.5-turbo")
        );
    }

    #[test]
    fn test_no_override_without_cli_or_config_model() {
        assert_eq!(model_override(None, &JudgeConfig::default()), None);
    }
}

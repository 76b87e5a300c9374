use super::{print_json, transport};
use crate::cli::TagArgs;
use crate::config::CliConfig;
use anyhow::Result;
use trustar_search::{ApiConfig, SearchIndicator};

pub fn build_tag(args: &TagArgs, api: &ApiConfig) -> SearchIndicator {
    let mut search = SearchIndicator::new(api);
    if let Some(id) = &args.indicator_id {
        search.set_indicator_id(id.as_str());
    }
    for tag in &args.tags {
        search.set_tag(tag.as_str());
    }
    search
}

pub async fn add(args: TagArgs, config: &CliConfig) -> Result<()> {
    let search = build_tag(&args, &config.api);
    if !args.execute {
        return print_json(&search.create_tag_request()?);
    }
    let created = search.create_tag(&transport(config)?).await?;
    print_json(&created)
}

pub async fn delete(args: TagArgs, config: &CliConfig) -> Result<()> {
    let search = build_tag(&args, &config.api);
    if !args.execute {
        return print_json(&search.delete_tag_request()?);
    }
    let deleted = search.delete_tag(&transport(config)?).await?;
    print_json(&deleted)
}

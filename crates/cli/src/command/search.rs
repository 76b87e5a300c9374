use super::{print_json, transport};
use crate::cli::SearchArgs;
use crate::config::CliConfig;
use anyhow::Result;
use trustar_protocol::SearchPage;
use trustar_search::{ApiConfig, Param, SearchIndicator, Transport};

/// Setters run only for flags that were given, so absent flags leave no body key.
pub fn build_search(args: &SearchArgs, api: &ApiConfig) -> trustar_search::Result<SearchIndicator> {
    let mut search = SearchIndicator::new(api);

    if let Some(term) = &args.query_term {
        search.set_query_term(term.as_str());
    }
    if let Some(from) = &args.from {
        search.set_from(from.as_str())?;
    }
    if let Some(to) = &args.to {
        search.set_to(to.as_str())?;
    }
    if let Some(column) = &args.sort_column {
        search.set_sort_column(column)?;
    }
    if !args.priority_scores.is_empty() {
        search.set_priority_scores(args.priority_scores.iter().copied())?;
    }
    if !args.enclave_ids.is_empty() {
        search.set_enclave_ids(args.enclave_ids.clone());
    }
    if !args.types.is_empty() {
        search.set_observable_types(&args.types)?;
    }
    if !args.attributes.is_empty() {
        search.set_attributes(args.attributes.iter().cloned())?;
    }
    if !args.related.is_empty() {
        search.set_related_observables(args.related.iter().cloned())?;
    }
    if let Some(size) = args.page_size {
        search.set_page_size(size);
    }
    for (key, value) in &args.params {
        search.set_custom_param(Param::new(key.as_str(), value.clone()));
    }

    Ok(search)
}

pub async fn run(args: SearchArgs, config: &CliConfig) -> Result<()> {
    let request = build_search(&args, &config.api)?.query()?;
    if !args.execute {
        return print_json(&request);
    }

    let response = transport(config)?.send(&request).await?;
    match serde_json::from_value::<SearchPage>(response.clone()) {
        Ok(page) => {
            log::info!("Search returned {} observables", page.items.len());
            for item in &page.items {
                log::debug!("{item}");
            }
        }
        Err(err) => log::warn!("Unrecognized search response shape: {err}"),
    }
    print_json(&response)
}

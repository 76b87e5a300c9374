//! Terminal operations on [`SearchIndicator`].

use crate::builder::SearchIndicator;
use crate::error::{reject, Result, SearchError};
use crate::transport::Transport;
use serde_json::{Map, Value};
use trustar_protocol::{Method, QueryString, RequestDescriptor};

impl SearchIndicator {
    /// Both bounds unset, one bound unset, or `to >= from`.
    fn check_window(&self) -> Result<()> {
        match (self.from_date, self.to_date) {
            (Some(from), Some(to)) if to < from => {
                Err(reject(SearchError::InvalidWindow { from, to }))
            }
            _ => Ok(()),
        }
    }

    pub fn tag_endpoint(&self) -> Option<String> {
        self.indicator_id
            .as_deref()
            .map(|id| format!("{}{}", self.endpoint, tag_suffix(id)))
    }

    /// Finalizes the search: POST to the indicators endpoint with the collapsed
    /// parameter body and `pageSize` as the query pair.
    pub fn query(&self) -> Result<RequestDescriptor> {
        self.check_window()?;
        let request = RequestDescriptor::new(Method::Post, self.endpoint.as_str())
            .with_params(self.params.serialize())
            .with_query(QueryString::pair("pageSize", self.page_size.to_string()));
        log::info!(
            "Search request finalized: {} params, pageSize {}",
            request.params().map_or(0, Map::len),
            self.page_size
        );
        Ok(request)
    }

    pub fn create_tag_request(&self) -> Result<RequestDescriptor> {
        let indicator_id = match self.indicator_id.as_deref() {
            Some(id) if !self.tags.is_empty() => id,
            _ => return Err(reject(SearchError::MissingTagContext)),
        };
        Ok(self.tag_request(Method::Post, indicator_id))
    }

    pub fn delete_tag_request(&self) -> Result<RequestDescriptor> {
        let indicator_id = self
            .indicator_id
            .as_deref()
            .ok_or_else(|| reject(SearchError::MissingIndicatorId))?;
        Ok(self.tag_request(Method::Delete, indicator_id))
    }

    pub async fn create_tag<T>(&self, transport: &T) -> Result<Value>
    where
        T: Transport + ?Sized,
    {
        let request = self.create_tag_request()?;
        Ok(transport.fetch_one(&request).await?)
    }

    pub async fn delete_tag<T>(&self, transport: &T) -> Result<Value>
    where
        T: Transport + ?Sized,
    {
        let request = self.delete_tag_request()?;
        Ok(transport.fetch_one(&request).await?)
    }

    fn tag_request(&self, method: Method, indicator_id: &str) -> RequestDescriptor {
        let mut request = RequestDescriptor::new(method, self.endpoint.as_str())
            .with_query(QueryString::path(tag_suffix(indicator_id)));
        if !self.tags.is_empty() {
            let mut body = Map::new();
            body.insert(
                "tags".to_string(),
                Value::from(self.tags.iter().cloned().collect::<Vec<_>>()),
            );
            request = request.with_params(body);
        }
        log::info!("Tag request finalized: {} {}", method, request.url());
        request
    }
}

fn tag_suffix(indicator_id: &str) -> String {
    format!("/{indicator_id}/tags")
}

//! Query option types

use serde::{Deserialize, Serialize};

/// `$inlinecount` values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InlineCount {
    /// Include the total count of matching entities in the response
    AllPages,
    /// Do not include a count
    None,
}

impl InlineCount {
    /// Wire value
    pub fn as_str(self) -> &'static str {
        match self {
            InlineCount::AllPages => "allpages",
            InlineCount::None => "none",
        }
    }
}

/// OData system query options for one request.
///
/// Unset fields are omitted from the query string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryOptions {
    /// `$select`: comma-separated properties to return
    pub select: Option<String>,
    /// `$filter`: boolean expression restricting the returned entities
    pub filter: Option<String>,
    /// `$top`: maximum number of entities to return
    pub top: Option<u32>,
    /// `$skip`: number of entities to skip
    pub skip: Option<u32>,
    /// `$format`: response media format (`json`, `atom`, `xml`)
    pub format: Option<String>,
    /// `$orderby`: properties to sort by, e.g. `PRDID desc`
    pub orderby: Option<String>,
    /// `$expand`: navigation properties to inline
    pub expand: Option<String>,
    /// `$count`: ask for the number of matching entities (OData v4)
    pub count: Option<bool>,
    /// `$search`: free-text search expression (OData v4)
    pub search: Option<String>,
    /// `$inlinecount`: ask for the number of matching entities (OData v2)
    pub inlinecount: Option<InlineCount>,
    /// `$skiptoken`: server-driven paging token
    pub skiptoken: Option<String>,
}

impl QueryOptions {
    /// Create empty options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `$select`
    #[must_use]
    pub fn select(mut self, select: impl Into<String>) -> Self {
        self.select = Some(select.into());
        self
    }

    /// Set `$filter`
    #[must_use]
    pub fn filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// Set `$top`
    #[must_use]
    pub fn top(mut self, top: u32) -> Self {
        self.top = Some(top);
        self
    }

    /// Set `$skip`
    #[must_use]
    pub fn skip(mut self, skip: u32) -> Self {
        self.skip = Some(skip);
        self
    }

    /// Set `$format`
    #[must_use]
    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Set `$orderby`
    #[must_use]
    pub fn orderby(mut self, orderby: impl Into<String>) -> Self {
        self.orderby = Some(orderby.into());
        self
    }

    /// Set `$expand`
    #[must_use]
    pub fn expand(mut self, expand: impl Into<String>) -> Self {
        self.expand = Some(expand.into());
        self
    }

    /// Set `$count`
    #[must_use]
    pub fn count(mut self, count: bool) -> Self {
        self.count = Some(count);
        self
    }

    /// Set `$search`
    #[must_use]
    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Set `$inlinecount`
    #[must_use]
    pub fn inlinecount(mut self, inlinecount: InlineCount) -> Self {
        self.inlinecount = Some(inlinecount);
        self
    }

    /// Set `$skiptoken`
    #[must_use]
    pub fn skiptoken(mut self, token: impl Into<String>) -> Self {
        self.skiptoken = Some(token.into());
        self
    }

    /// The same options positioned at one page window
    #[must_use]
    pub fn window(&self, skip: u32, top: u32) -> Self {
        Self {
            top: Some(top),
            skip: Some(skip),
            ..self.clone()
        }
    }

    /// Query pairs in a fixed order, unset options omitted
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();

        let mut push = |key: &'static str, value: Option<String>| {
            if let Some(value) = value {
                pairs.push((key, value));
            }
        };

        push("$select", self.select.clone());
        push("$filter", self.filter.clone());
        push("$top", self.top.map(|v| v.to_string()));
        push("$skip", self.skip.map(|v| v.to_string()));
        push("$format", self.format.clone());
        push("$orderby", self.orderby.clone());
        push("$expand", self.expand.clone());
        push("$count", self.count.map(|v| v.to_string()));
        push("$search", self.search.clone());
        push(
            "$inlinecount",
            self.inlinecount.map(|v| v.as_str().to_string()),
        );
        push("$skiptoken", self.skiptoken.clone());

        pairs
    }
}

/// One request against a named resource (entity set)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Entity set path relative to the service root, e.g. `LOCATION`
    pub resource: String,
    /// Query options, including the page window
    pub options: QueryOptions,
}

impl PageRequest {
    /// Create a page request
    pub fn new(resource: impl Into<String>, options: QueryOptions) -> Self {
        Self {
            resource: resource.into(),
            options,
        }
    }

    /// Requested page size, if bounded
    pub fn top(&self) -> Option<u32> {
        self.options.top
    }

    /// Offset of this page
    pub fn skip(&self) -> u32 {
        self.options.skip.unwrap_or(0)
    }
}

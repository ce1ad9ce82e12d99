//! Proxy selection extension.
//!
//! Picks one proxy per execution by weighted random selection and routes the
//! client through it. Only clients configured by this crate can be rerouted;
//! a prebuilt `reqwest::Client` keeps its own transport and is rejected.

use std::sync::Arc;

use rand::distr::{weighted::WeightedIndex, Distribution};
use reqwest::Proxy;
use tracing::debug;

use super::{BoxError, ClientOverride, Extension};
use crate::http::HttpClient;

/// Routes each request through one of several proxies.
///
/// ```rust
/// use volley::extension::ProxiesExtension;
///
/// let proxies = ProxiesExtension::weighted([
///     ("http://10.0.0.1:3128", 3),
///     ("http://10.0.0.2:3128", 1),
/// ]);
/// assert_eq!(proxies.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProxiesExtension {
    proxies: Vec<(String, u32)>,
}

impl ProxiesExtension {
    /// Creates the extension with every proxy equally likely.
    pub fn new<I, S>(proxies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::weighted(proxies.into_iter().map(|url| (url, 1)))
    }

    /// Creates the extension with a selection weight per proxy.
    pub fn weighted<I, S>(proxies: I) -> Self
    where
        I: IntoIterator<Item = (S, u32)>,
        S: Into<String>,
    {
        Self {
            proxies: proxies
                .into_iter()
                .map(|(url, weight)| (url.into(), weight))
                .collect(),
        }
    }

    /// Gets the number of configured proxies.
    pub fn len(&self) -> usize {
        self.proxies.len()
    }

    /// Gets whether no proxy is configured.
    pub fn is_empty(&self) -> bool {
        self.proxies.is_empty()
    }

    /// Picks a proxy URL according to the weights.
    pub fn pick(&self) -> Result<&str, BoxError> {
        if self.proxies.is_empty() {
            return Err("nil proxies".into());
        }
        let index = WeightedIndex::new(self.proxies.iter().map(|(_, weight)| *weight))?;
        let (url, _) = &self.proxies[index.sample(&mut rand::rng())];
        Ok(url)
    }
}

impl ClientOverride for ProxiesExtension {
    fn override_client(&self, mut client: HttpClient) -> Result<HttpClient, BoxError> {
        let url = self.pick()?;
        let proxy =
            Proxy::all(url).map_err(|e| format!("error parse proxy url {}: {}", url, e))?;

        let config = client
            .config_mut()
            .ok_or("unsupported http transport: prebuilt client")?;
        debug!(proxy = url, "Routing request through proxy");
        config.proxy = Some(proxy);

        Ok(client)
    }
}

impl Extension for ProxiesExtension {
    fn client_override(self: Arc<Self>) -> Option<Arc<dyn ClientOverride>> {
        Some(self)
    }
}

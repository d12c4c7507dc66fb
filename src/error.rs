use crate::graph::GraphError;
use crate::impl_err;
use crate::markov::FilterError;
use crate::matching::ConfigError;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error(transparent)]
    Filter(FilterError),

    #[error(transparent)]
    Config(ConfigError),

    #[error(transparent)]
    Graph(GraphError),
}

impl_err!(FilterError, Filter);
impl_err!(ConfigError, Config);
impl_err!(GraphError, Graph);

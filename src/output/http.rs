use reqwest::blocking::Client;

use crate::config::InfluxDbConfig;
use crate::error::{Error, Result};
use crate::model::Batch;

use super::lineproto::encode_batch;
use super::sink::StorageSink;

/// InfluxDB sink speaking line protocol over the v1 HTTP API.
pub struct HttpSink {
    client: Client,
    address: String,
    user: String,
    password: String,
}

impl HttpSink {
    pub fn new(conf: &InfluxDbConfig) -> Self {
        Self {
            client: Client::new(),
            address: conf.address.trim_end_matches('/').to_string(),
            user: conf.id.clone(),
            password: conf.password.clone(),
        }
    }

    fn check(response: reqwest::blocking::Response) -> Result<()> {
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        Err(Error::StorageStatus {
            status: status.as_u16(),
            body: response.text().unwrap_or_default(),
        })
    }
}

impl StorageSink for HttpSink {
    fn ensure_database(&mut self, name: &str) -> Result<()> {
        let response = self
            .client
            .post(&format!("{}/query", self.address))
            .basic_auth(&self.user, Some(&self.password))
            .form(&[("q", format!("CREATE DATABASE \"{}\"", name))])
            .send()?;
        Self::check(response)
    }

    fn write(&mut self, batch: &Batch) -> Result<()> {
        let response = self
            .client
            .post(&format!("{}/write", self.address))
            .basic_auth(&self.user, Some(&self.password))
            .query(&[
                ("db", batch.database()),
                ("rp", batch.retention_policy()),
                ("consistency", batch.consistency().as_str()),
            ])
            .body(encode_batch(batch))
            .send()?;
        Self::check(response)
    }
}

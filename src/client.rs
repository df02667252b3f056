/*! Translation endpoint client.

Lines are sent in batches of `batch_size`, one POST per batch:

```json
{"contents": ["Halló heimur"], "sourceLanguageCode": "is", "targetLanguageCode": "en", "model": "moses"}
```

and the endpoint answers with one translation per line, in order:

```json
{"translations": [{"translatedText": "Hello world"}]}
```

[TranslateBulk] is lazy: a batch is only sent once the previous one has been consumed, so lines
translated before a failing batch have already reached the consumer when the error shows up.
!*/
use std::time::Duration;

use log::{debug, info};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::Error;

pub const DEFAULT_URL: &str = "https://nlp.cs.ru.is/moses/translateText";
pub const DEFAULT_MODEL: &str = "moses";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationRequest {
    pub contents: Vec<String>,
    pub source_language_code: String,
    pub target_language_code: String,
    pub model: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Translation {
    pub translated_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationResponse {
    pub translations: Vec<Translation>,
}

/// Something that turns a request into a response.
pub trait Transport {
    fn send(&self, request: &TranslationRequest) -> Result<TranslationResponse, Error>;
}

/// Blocking HTTP transport.
///
/// Must not be created or dropped from within an async context, use `spawn_blocking`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    url: Url,
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new(url: &str) -> Result<Self, Error> {
        let url = Url::parse(url)
            .map_err(|e| Error::InvalidConfig(format!("invalid url {}: {}", url, e)))?;
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(120))
            .build()?;
        Ok(Self { url, client })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: &TranslationRequest) -> Result<TranslationResponse, Error> {
        let resp = self.client.post(self.url.clone()).json(request).send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Upstream(format!("{} answered {}", self.url, status)));
        }
        resp.json::<TranslationResponse>()
            .map_err(|e| Error::Upstream(format!("malformed response from {}: {}", self.url, e)))
    }
}

/// Lazy batched translation of a line sequence.
pub struct TranslateBulk<I, T> {
    lines: I,
    transport: T,
    s_lang: String,
    t_lang: String,
    model: String,
    batch_size: usize,
    current: std::vec::IntoIter<String>,
    nb_batches: usize,
    done: bool,
}

impl<I, T> TranslateBulk<I, T>
where
    I: Iterator<Item = Result<String, Error>>,
    T: Transport,
{
    pub fn new(
        lines: I,
        transport: T,
        s_lang: &str,
        t_lang: &str,
        model: &str,
        batch_size: usize,
    ) -> Result<Self, Error> {
        if batch_size == 0 {
            return Err(Error::InvalidConfig("batch_size must be positive".to_string()));
        }
        Ok(Self {
            lines,
            transport,
            s_lang: s_lang.to_string(),
            t_lang: t_lang.to_string(),
            model: model.to_string(),
            batch_size,
            current: Vec::new().into_iter(),
            nb_batches: 0,
            done: false,
        })
    }

    /// Number of requests sent so far.
    pub fn nb_batches(&self) -> usize {
        self.nb_batches
    }

    /// Translate the next batch. `Ok(false)` means the input is exhausted.
    fn fill(&mut self) -> Result<bool, Error> {
        let mut contents = Vec::with_capacity(self.batch_size);
        for line in self.lines.by_ref().take(self.batch_size) {
            contents.push(line?);
        }
        if contents.is_empty() {
            return Ok(false);
        }

        self.nb_batches += 1;
        debug!("batch {}: translating {} lines", self.nb_batches, contents.len());
        let nb_sent = contents.len();
        let request = TranslationRequest {
            contents,
            source_language_code: self.s_lang.clone(),
            target_language_code: self.t_lang.clone(),
            model: self.model.clone(),
        };
        let response = self.transport.send(&request)?;
        if response.translations.len() != nb_sent {
            return Err(Error::Upstream(format!(
                "sent {} lines, got {} translations",
                nb_sent,
                response.translations.len()
            )));
        }

        self.current = response
            .translations
            .into_iter()
            .map(|t| t.translated_text)
            .collect::<Vec<String>>()
            .into_iter();
        Ok(true)
    }
}

impl<I, T> Iterator for TranslateBulk<I, T>
where
    I: Iterator<Item = Result<String, Error>>,
    T: Transport,
{
    type Item = Result<String, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(line) = self.current.next() {
                return Some(Ok(line));
            }
            if self.done {
                return None;
            }
            match self.fill() {
                Ok(true) => continue,
                Ok(false) => {
                    self.done = true;
                    return None;
                }
                Err(e) => {
                    // nothing is attempted after a failing batch
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }
    }
}

/// Translate `lines` through the HTTP endpoint at `url`.
pub fn translate_bulk<I>(
    lines: I,
    url: &str,
    s_lang: &str,
    t_lang: &str,
    model: &str,
    batch_size: usize,
) -> Result<TranslateBulk<I, HttpTransport>, Error>
where
    I: Iterator<Item = Result<String, Error>>,
{
    info!("translating {}->{} with {} at {}", s_lang, t_lang, model, url);
    TranslateBulk::new(lines, HttpTransport::new(url)?, s_lang, t_lang, model, batch_size)
}

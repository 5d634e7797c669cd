//! ARN parsing, formatting and lookup helpers.
//!
//! An ARN has six colon-delimited fields:
//! `arn:partition:service:region:account:resource`. Region and account may be
//! empty, and the resource part may itself contain colons or slashes.
//!
//! How the resource part splits depends on the service. S3 treats the whole
//! remainder as the resource (`bucket/key` is one resource). Everything else
//! splits on the first `/` if there is one (`instance/i-123`), otherwise on
//! the first `:` (`function:my-fn`), otherwise has no resource type.
//!
//! Malformed input is reported as `None`/`false`, never as a panic.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::warn;
use utoipa::ToSchema;

use crate::error::ComposerError;
use crate::pattern::ArnPattern;
use crate::types::ArnItem;

pub const ARN_SCHEME: &str = "arn";
pub const DEFAULT_PARTITION: &str = "aws";
pub const DEFAULT_REGION: &str = "us-east-1";
pub const DEFAULT_ACCOUNT: &str = "123456789012";

/// Services whose resource part is never split into type and id.
const UNSPLIT_SERVICES: &[&str] = &["s3"];

static STRUCTURE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^[^:]*:[^:]*:[^:]*:[^:]*:[^:]*:.+$").expect("static ARN structure regex")
});

/// The structured form of an ARN.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ParsedArn {
    pub partition: String,
    pub service: String,
    pub region: String,
    pub account: String,
    pub resource: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
}

impl ParsedArn {
    /// Build an ARN in the default `aws` partition.
    pub fn new(
        service: impl Into<String>,
        region: impl Into<String>,
        account: impl Into<String>,
        resource: impl Into<String>,
    ) -> Self {
        Self {
            partition: DEFAULT_PARTITION.to_string(),
            service: service.into(),
            region: region.into(),
            account: account.into(),
            resource: resource.into(),
            resource_type: None,
        }
    }

    pub fn with_resource_type(mut self, resource_type: impl Into<String>) -> Self {
        self.resource_type = Some(resource_type.into());
        self
    }

    pub fn with_partition(mut self, partition: impl Into<String>) -> Self {
        self.partition = partition.into();
        self
    }
}

impl Display for ParsedArn {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "{ARN_SCHEME}:{}:{}:{}:{}:",
            self.partition, self.service, self.region, self.account
        )?;
        match &self.resource_type {
            Some(resource_type) => write!(f, "{resource_type}/{}", self.resource),
            None => write!(f, "{}", self.resource),
        }
    }
}

impl FromStr for ParsedArn {
    type Err = ComposerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s).ok_or_else(|| {
            ComposerError::InvalidArn(format!(
                "'{s}' (expected format: arn:partition:service:region:account:resource)"
            ))
        })
    }
}

/// Parse an ARN into its fields. Returns `None` when there are fewer than six fields.
pub fn parse(arn: &str) -> Option<ParsedArn> {
    let mut fields = arn.splitn(6, ':');
    let _scheme = fields.next()?;
    let partition = fields.next()?;
    let service = fields.next()?;
    let region = fields.next()?;
    let account = fields.next()?;
    let resource_part = fields.next()?;

    let (resource_type, resource) = split_resource(service, resource_part);

    Some(ParsedArn {
        partition: partition.to_string(),
        service: service.to_string(),
        region: region.to_string(),
        account: account.to_string(),
        resource: resource.to_string(),
        resource_type: resource_type.map(str::to_string),
    })
}

fn split_resource<'a>(service: &str, resource_part: &'a str) -> (Option<&'a str>, &'a str) {
    if UNSPLIT_SERVICES.contains(&service) {
        return (None, resource_part);
    }
    if let Some((resource_type, resource)) = resource_part.split_once('/') {
        return (Some(resource_type), resource);
    }
    if let Some((resource_type, resource)) = resource_part.split_once(':') {
        return (Some(resource_type), resource);
    }
    (None, resource_part)
}

/// Inverse of [`parse`]. A resource type is re-joined with `/`.
pub fn format(parsed: &ParsedArn) -> String {
    parsed.to_string()
}

/// Cheap structural check: six fields and a non-empty resource part.
pub fn validate_format(arn: &str) -> bool {
    STRUCTURE.is_match(arn)
}

pub fn extract_service(arn: &str) -> Option<String> {
    parse(arn).map(|p| p.service)
}

pub fn extract_resource_type(arn: &str) -> Option<String> {
    parse(arn).and_then(|p| p.resource_type)
}

pub fn filter_by_service<'a>(items: &'a [ArnItem], service: &str) -> Vec<&'a ArnItem> {
    items.iter().filter(|item| item.service == service).collect()
}

pub fn filter_by_resource_type<'a>(items: &'a [ArnItem], resource_type: &str) -> Vec<&'a ArnItem> {
    items
        .iter()
        .filter(|item| item.resource_type.as_deref() == Some(resource_type))
        .collect()
}

/// Glob match of `arn` against `pattern`; see [`ArnPattern`].
pub fn match_pattern(arn: &str, pattern: &str) -> bool {
    match ArnPattern::new(pattern) {
        Ok(compiled) => compiled.is_match(arn),
        Err(e) => {
            warn!(event = "Pattern", phase = "Compile", pattern = pattern, error = %e);
            false
        }
    }
}

/// Example ARNs for `service`, using the given region/account or the defaults.
///
/// Unknown services get a single wildcard suggestion.
pub fn suggest(service: &str, region: Option<&str>, account: Option<&str>) -> Vec<String> {
    let region = region.unwrap_or(DEFAULT_REGION);
    let account = account.unwrap_or(DEFAULT_ACCOUNT);

    match service {
        "s3" => vec![
            "arn:aws:s3:::my-bucket".to_string(),
            "arn:aws:s3:::my-bucket/*".to_string(),
            "arn:aws:s3:::my-bucket/path/to/object".to_string(),
        ],
        "ec2" => vec![
            format!("arn:aws:ec2:{region}:{account}:instance/*"),
            format!("arn:aws:ec2:{region}:{account}:instance/i-1234567890abcdef0"),
            format!("arn:aws:ec2:{region}:{account}:volume/*"),
            format!("arn:aws:ec2:{region}:{account}:security-group/*"),
        ],
        "lambda" => vec![
            format!("arn:aws:lambda:{region}:{account}:function:*"),
            format!("arn:aws:lambda:{region}:{account}:function:my-function"),
        ],
        "iam" => vec![
            format!("arn:aws:iam::{account}:role/*"),
            format!("arn:aws:iam::{account}:role/my-role"),
            format!("arn:aws:iam::{account}:user/my-user"),
            format!("arn:aws:iam::{account}:policy/my-policy"),
        ],
        "dynamodb" => vec![
            format!("arn:aws:dynamodb:{region}:{account}:table/*"),
            format!("arn:aws:dynamodb:{region}:{account}:table/my-table"),
            format!("arn:aws:dynamodb:{region}:{account}:table/my-table/index/*"),
        ],
        other => vec![format!("arn:aws:{other}:{region}:{account}:*")],
    }
}

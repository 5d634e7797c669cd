use super::*;
use crate::dependencies::{DependencyEntry, DependencyTable};
use crate::types::{Operation, OperationCategory};
use yare::parameterized;

mod selection;

const TEST_TABLES: &str = r#"
{
    "s3": {
        "s3:GetObject": { "dependencies": ["s3:ListBucket"] },
        "s3:ReadOnly": { "actions": ["s3:GetObject", "s3:ListBucket"] }
    },
    "ec2": {
        "ec2:StartInstances": { "dependencies": ["ec2:DescribeInstances"] },
        "ec2:RunInstances": {
            "requires": ["iam:PassRole"],
            "soft_requires": ["ec2:CreateTags"],
            "description": "Launch instances"
        }
    }
}
"#;

fn test_engine() -> PolicyEngine {
    PolicyEngine::with_tables(loader::load_dependency_tables(TEST_TABLES).unwrap())
}

fn s3_resource(id: &str) -> Resource {
    Resource::new(id, "s3")
        .with_name("S3 bucket")
        .with_action(
            Operation::new("s3:GetObject", OperationCategory::Read)
                .with_dependencies(["s3:ListBucket"]),
        )
        .with_action(Operation::new("s3:PutObject", OperationCategory::Write))
}

fn ec2_resource(id: &str) -> Resource {
    Resource::new(id, "ec2")
        .with_name("EC2 instance")
        .with_address_pattern("arn:aws:ec2:*:*:instance/*")
        .with_action(Operation::new("ec2:StartInstances", OperationCategory::Write))
        .with_action(Operation::new("ec2:RunInstances", OperationCategory::Admin))
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

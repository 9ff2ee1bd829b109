//! Integration tests for the generate command.

use apigen_cli::commands::generate::{GenerateArgs, execute};
use apigen_cli::formatters::format_report;
use apigen_core::cli::OutputFormat;
use apigen_core::{AbortReason, RunStatus};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn tags_backend(root: &Path) {
    write(
        root,
        "Domain/ValueObject/EntityKeyObject.cs",
        "[ValueObject<int>(Conversions.EfCoreValueConverter)]
         public partial struct TagId;",
    );
    write(
        root,
        "Application/Dto/Request/CreateTagRequest.cs",
        "public class CreateTagRequest
         {
             public string Name { get; set; } = string.Empty;
         }",
    );
    write(
        root,
        "Application/Dto/Response/GetTagsResponse.cs",
        "public class GetTagsResponse
         {
             public List<TagDto> Tags { get; set; } = new();
         }",
    );
    write(
        root,
        "Application/Dto/TagDto.cs",
        "public class TagDto
         {
             public TagId Id { get; set; }
             public string Name { get; set; } = string.Empty;
         }",
    );
    write(
        root,
        "Controller/TagsController.cs",
        r#"
        public class TagsController : ControllerBase
        {
            [HttpGet]
            public async Task<ActionResult<GetTagsResponse>> GetTags()
            {
                return Ok(await service.ExecuteAsync());
            }
        }
        "#,
    );
}

#[test]
fn test_config_file_drives_the_run() {
    let temp = TempDir::new().unwrap();
    tags_backend(&temp.path().join("backend"));
    let config = temp.path().join("apigen.toml");
    fs::write(
        &config,
        format!(
            "backend_root = {:?}\noutput_dir = {:?}\napi_client_module = \"@/lib/api/client\"\n",
            temp.path().join("backend"),
            temp.path().join("web"),
        ),
    )
    .unwrap();

    let report = execute(&GenerateArgs {
        config: Some(config),
        ..GenerateArgs::default()
    })
    .unwrap();

    assert_eq!(report.status, RunStatus::Success, "{report:#?}");
    assert_eq!(report.endpoint_count, 1);
    assert_eq!(report.artifacts.len(), 4);

    let endpoints = fs::read_to_string(temp.path().join("web/endpoints.ts")).unwrap();
    assert!(endpoints.contains("import { apiClient } from '@/lib/api/client';"));
    assert!(endpoints.contains("getTags: async (): Promise<GetTagsResponse> => {"));

    let types = fs::read_to_string(temp.path().join("web/types.ts")).unwrap();
    assert!(types.contains("  id: number;"));
    assert!(types.contains("  tags: TagDto[];"));

    let server = fs::read_to_string(temp.path().join("web/server.ts")).unwrap();
    assert!(server.contains("export const tagsServerApi = {"));
}

#[test]
fn test_flags_without_config_file() {
    let temp = TempDir::new().unwrap();
    tags_backend(&temp.path().join("Src"));

    let report = execute(&GenerateArgs {
        backend_root: Some(temp.path().join("Src")),
        output_dir: Some(temp.path().join("out")),
        dry_run: true,
        ..GenerateArgs::default()
    })
    .unwrap();

    assert!(report.dry_run);
    assert!(!temp.path().join("out").exists());

    let text = format_report(&report, OutputFormat::Text, false).unwrap();
    assert!(text.starts_with("status: success [dry run]"));
    assert!(text.contains("not written"));
}

#[test]
fn test_abort_is_not_an_error() {
    let temp = TempDir::new().unwrap();

    let report = execute(&GenerateArgs {
        backend_root: Some(temp.path().join("missing")),
        output_dir: Some(temp.path().join("out")),
        ..GenerateArgs::default()
    })
    .unwrap();

    assert_eq!(report.abort_reason, Some(AbortReason::BackendRootMissing));
    let json = format_report(&report, OutputFormat::Json, false).unwrap();
    assert!(json.contains("\"abort_reason\": \"backend_root_missing\""));
}

#[test]
fn test_invalid_config_file_is_an_error() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("apigen.toml");
    fs::write(&config, "[outputs]\ntypes = \"\"\n").unwrap();

    let err = execute(&GenerateArgs {
        config: Some(config),
        ..GenerateArgs::default()
    })
    .unwrap_err();
    assert!(format!("{err:#}").contains("cannot be empty"));
}

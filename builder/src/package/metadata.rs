//! Generated metadata files placed at the staging root.
//!
//! Three files are produced: the build descriptor read by the add-in manager,
//! the add-in definition read by the runtime, and the menu customization file
//! derived from a template in the source tree.

use super::error::PackagingError;
use crate::release::build_version::BuildVersion;
use crate::release::version::EncodedVersion;
use camino::{Utf8Path, Utf8PathBuf};
use log::debug;

/// File name of the build descriptor.
pub const BUILD_DESCRIPTOR_FILE: &str = "customMetaData.jsl";
/// File name of the add-in definition.
pub const DEFINITION_FILE: &str = "addin.def";
/// File name of the menu customization.
pub const CUSTOMIZATION_FILE: &str = "addin.jmpcust";
/// Directory, relative to the staging root, holding the manifest and template.
pub const WORKFLOWS_DIR: &str = ".github/workflows";
/// Placeholder replaced by the release tag.
pub const TAG_PLACEHOLDER: &str = "TOOLTAG";
/// Placeholder replaced by the add-in identifier.
pub const ADDIN_ID_PLACEHOLDER: &str = "AdDinIDDoNotTouCHY";

/// Identity and deployment strings supplied by configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddinIdentity {
    /// Add-in identifier, e.g. `com.acme.reporttool`.
    pub id: String,
    /// Display name; also the archive base name.
    pub name: String,
    /// Author; written to the descriptor verbatim.
    pub author: String,
    /// Deployed location of the add-in.
    pub prod_path: String,
    /// Location of the published add-ins list.
    pub pub_path: String,
}

/// Path of `file_name` inside the staging tree's workflow directory.
#[must_use]
pub fn workflow_file(staging_root: &Utf8Path, file_name: &str) -> Utf8PathBuf {
    staging_root.join(WORKFLOWS_DIR).join(file_name)
}

/// Render the build descriptor.
///
/// The author is inserted without quoting, so it may itself be an
/// expression. The text has no trailing newline.
#[must_use]
pub fn render_build_descriptor(identity: &AddinIdentity, build: &BuildVersion) -> String {
    format!(
        concat!(
            "/* DO NOT EDIT THIS FILE YOURSELF AS IT IS CHANGED BY ADD-IN MANAGER */\n",
            "\n",
            "Associative Array(\n",
            "\tList(\n",
            "\t\tList( \"addinVersion\",{version}),\n",
            "\t\tList( \"author\",{author}),\n",
            "\t\tList( \"buildDate\",{date}),\n",
            "\t\tList( \"deployedAddinsFilename\",\"{pub_path}\"),\n",
            "\t\tList( \"deployedAddinsLoc\", \"{prod_path}\"),\n",
            "\t\tList( \"id\",\"{id}\"),\n",
            "\t\tList( \"name\",\"{name}\"),\n",
            "\t\tList( \"state\",\"{stage}\")\n",
            "\t)\n",
            ")"
        ),
        version = build.version(),
        author = identity.author,
        date = build.build_date(),
        pub_path = identity.pub_path,
        prod_path = identity.prod_path,
        id = identity.id,
        name = identity.name,
        stage = build.stage(),
    )
}

/// Render the add-in definition.
///
/// # Examples
///
/// ```
/// use jaab::package::metadata::{AddinIdentity, render_definition};
/// use jaab::release::version::EncodedVersion;
///
/// let identity = AddinIdentity {
///     id: "com.acme.tool".to_owned(),
///     name: "Tool".to_owned(),
///     ..AddinIdentity::default()
/// };
/// assert_eq!(
///     render_definition(&identity, EncodedVersion::Number(10_009_001)),
///     "id=com.acme.tool\nname=Tool\naddinVersion=10009001"
/// );
/// ```
#[must_use]
pub fn render_definition(identity: &AddinIdentity, version: EncodedVersion) -> String {
    format!(
        "id={}\nname={}\naddinVersion={version}",
        identity.id, identity.name
    )
}

/// Substitute the tag and add-in identifier into a customization template.
///
/// The tag is substituted first; nothing else in the template changes.
#[must_use]
pub fn render_customization(template: &str, tag: &str, addin_id: &str) -> String {
    template
        .replace(TAG_PLACEHOLDER, tag)
        .replace(ADDIN_ID_PLACEHOLDER, addin_id)
}

/// Write the build descriptor into `staging_root`.
///
/// # Errors
///
/// Returns [`PackagingError::Io`] when the file cannot be written.
pub fn write_build_descriptor(
    staging_root: &Utf8Path,
    identity: &AddinIdentity,
    build: &BuildVersion,
) -> Result<Utf8PathBuf, PackagingError> {
    write_text(
        staging_root.join(BUILD_DESCRIPTOR_FILE),
        &render_build_descriptor(identity, build),
    )
}

/// Write the add-in definition into `staging_root`.
///
/// # Errors
///
/// Returns [`PackagingError::Io`] when the file cannot be written.
pub fn write_definition(
    staging_root: &Utf8Path,
    identity: &AddinIdentity,
    build: &BuildVersion,
) -> Result<Utf8PathBuf, PackagingError> {
    write_text(
        staging_root.join(DEFINITION_FILE),
        &render_definition(identity, build.version()),
    )
}

/// Read `template_name` from the workflow directory and write the customized
/// result into `staging_root`.
///
/// # Errors
///
/// Returns [`PackagingError::Io`] when the template cannot be read or the
/// result cannot be written.
pub fn write_customization(
    staging_root: &Utf8Path,
    template_name: &str,
    tag: &str,
    addin_id: &str,
) -> Result<Utf8PathBuf, PackagingError> {
    let template_path = workflow_file(staging_root, template_name);
    let template =
        std::fs::read_to_string(&template_path).map_err(PackagingError::io(&template_path))?;
    write_text(
        staging_root.join(CUSTOMIZATION_FILE),
        &render_customization(&template, tag, addin_id),
    )
}

fn write_text(path: Utf8PathBuf, text: &str) -> Result<Utf8PathBuf, PackagingError> {
    std::fs::write(&path, text).map_err(PackagingError::io(&path))?;
    debug!("wrote {path}");
    Ok(path)
}

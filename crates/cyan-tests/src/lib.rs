//! Integration tests for Cyan PDF crates.
//!
//! End-to-end checks across sniffing, profile classification, the template
//! cache, argument building and the process runner. Ghostscript is replaced
//! by a fake install tree, so no real installation is needed.

#[cfg(test)]
mod golden;

/// Fake Ghostscript installations for tests.
pub mod fake_gs {
    use cyan_job::PinnedTool;
    use std::fs;
    use std::io;
    use std::path::{Path, PathBuf};

    /// Template resembling the one Ghostscript ships.
    pub const PDFX_TEMPLATE: &str = "%!\n\
        % Define an ICC profile :\n\
        /ICCProfile (ISO Coated sb.icc) def  % Customize or remove.\n\
        \n\
        [ /GTS_PDFXVersion (PDF/X-3:2002) % Must be so (the standard requires).\n\
          /Title (Title)                  % Customize.\n\
          /Trapped /False                 % Must be so (Ghostscript doesn't provide other).\n\
          /DOCINFO pdfmark\n";

    /// A Unix-style install: `<root>/bin/gs` and
    /// `<root>/share/ghostscript/<version>/lib/PDFX_def.ps`.
    pub struct FakeInstall {
        /// Executable path.
        pub executable: PathBuf,
        /// Template path.
        pub template: PathBuf,
        /// Version string.
        pub version: String,
    }

    impl FakeInstall {
        /// Lays out an install under `root` whose executable does nothing.
        pub fn new(root: &Path, version: &str) -> io::Result<Self> {
            Self::with_script(root, version, "exit 0")
        }

        /// Lays out an install whose executable runs `body` as a shell script.
        pub fn with_script(root: &Path, version: &str, body: &str) -> io::Result<Self> {
            let bin = root.join("bin");
            let lib = root.join("share").join("ghostscript").join(version).join("lib");
            fs::create_dir_all(&bin)?;
            fs::create_dir_all(&lib)?;

            let executable = bin.join("gs");
            fs::write(&executable, format!("#!/bin/sh\n{body}\n"))?;
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                fs::set_permissions(&executable, fs::Permissions::from_mode(0o755))?;
            }
            let template = lib.join(cyan_job::TEMPLATE_NAME);
            fs::write(&template, PDFX_TEMPLATE)?;
            Ok(Self {
                executable,
                template,
                version: version.to_string(),
            })
        }

        /// Locator pinned to this install.
        pub fn tool(&self) -> PinnedTool {
            PinnedTool::new(&self.executable).with_version(&self.version)
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::fake_gs::FakeInstall;
    use cyan_core::{ColorSpace, RenderIntent, detect, fingerprint};
    use cyan_icc::{ProfileCatalog, color_space_of, fixtures};
    use cyan_job::{
        CacheKey, ConversionJob, DefaultProfiles, JobBuilder, JobError, ProfileRole,
        TemplateCache, run_conversion,
    };
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::tempdir;

    struct Profiles {
        rgb: PathBuf,
        gray: PathBuf,
        cmyk: PathBuf,
    }

    fn profiles(dir: &Path) -> Profiles {
        let icc = dir.join("icc");
        fs::create_dir_all(&icc).unwrap();
        Profiles {
            rgb: fixtures::write_srgb(&icc.join("sRGB.icc")).unwrap(),
            gray: fixtures::write_gray(&icc.join("Gray.icc")).unwrap(),
            cmyk: fixtures::write_cmyk(&icc.join("Coated.icc")).unwrap(),
        }
    }

    fn pdf(path: &Path) -> PathBuf {
        fs::write(path, b"%PDF-1.7\n1 0 obj << /Type /Catalog >> endobj\n%%EOF\n").unwrap();
        path.to_path_buf()
    }

    fn defaults(p: &Profiles) -> DefaultProfiles {
        DefaultProfiles {
            rgb: p.rgb.clone(),
            gray: p.gray.clone(),
            cmyk: p.cmyk.clone(),
        }
    }

    /// Catalog discovery feeds a job that validates.
    #[test]
    fn catalog_defaults_build_a_job() {
        let dir = tempdir().unwrap();
        let p = profiles(dir.path());
        let gs = FakeInstall::new(&dir.path().join("gs"), "10.04.0").unwrap();
        let input = pdf(&dir.path().join("brochure.pdf"));

        let catalog = ProfileCatalog::scan(&[dir.path().join("icc")]).unwrap();
        assert_eq!(catalog.len(), 3);
        let defaults = DefaultProfiles {
            rgb: catalog.preferred(ColorSpace::Rgb).unwrap().path.clone(),
            gray: catalog.preferred(ColorSpace::Gray).unwrap().path.clone(),
            cmyk: catalog.preferred(ColorSpace::Cmyk).unwrap().path.clone(),
        };
        let output = catalog.preferred_output().unwrap().path.clone();
        assert_eq!(output, p.cmyk);

        let job = ConversionJob::new(&input, dir.path().join("out.pdf"), &output, defaults)
            .with_target(color_space_of(&output));
        let builder = JobBuilder::new(TemplateCache::new(dir.path().join("cache")), gs.tool());
        let args = builder.build_args(&job).unwrap();

        assert_eq!(args.len(), 20);
        assert!(args.contains(&"-sColorConversionStrategy=CMYK".into()));
        let template = PathBuf::from(&args[18]);
        assert_eq!(template.file_stem().unwrap().to_string_lossy(), fingerprint(&input).unwrap());
        let text = fs::read_to_string(&template).unwrap();
        assert!(text.contains(&format!(
            "/ICCProfile ({}) def  % Customize or remove.",
            std::path::absolute(&output).unwrap().display()
        )));
        assert!(text.contains("/GTS_PDFXVersion (PDF/X-3:2002)"));
    }

    /// Same document, different output profiles, with both cache keyings.
    #[test]
    fn cache_keying_modes() {
        let dir = tempdir().unwrap();
        let p = profiles(dir.path());
        let gs = FakeInstall::new(&dir.path().join("gs"), "9.56.1").unwrap();
        let input = pdf(&dir.path().join("doc.pdf"));

        let shared = TemplateCache::new(dir.path().join("shared"));
        let a = shared.patched_template(&gs.tool(), &input, &p.cmyk).unwrap();
        let b = shared.patched_template(&gs.tool(), &input, &p.gray).unwrap();
        assert_eq!(a, b);
        assert!(fs::read_to_string(&b).unwrap().contains("Gray.icc"));

        let split = TemplateCache::new(dir.path().join("split")).with_key(CacheKey::DocumentAndProfile);
        let a = split.patched_template(&gs.tool(), &input, &p.cmyk).unwrap();
        let b = split.patched_template(&gs.tool(), &input, &p.gray).unwrap();
        assert_ne!(a, b);
        assert!(fs::read_to_string(&a).unwrap().contains("Coated.icc"));
    }

    /// Grayscale conversion through a fake Ghostscript that writes the
    /// requested output file.
    #[cfg(unix)]
    #[test]
    fn gray_conversion_runs_tool() {
        let dir = tempdir().unwrap();
        let p = profiles(dir.path());
        let script = r#"for arg in "$@"; do
  case "$arg" in
    -sOutputFile=*) out="${arg#-sOutputFile=}" ;;
  esac
done
printf '%%PDF-1.4\n%%%%EOF\n' > "$out"
echo "Processing pages 1 through 1."
"#;
        let gs = FakeInstall::with_script(&dir.path().join("gs"), "10.02.1", script).unwrap();
        let input = pdf(&dir.path().join("in.pdf"));
        let output = dir.path().join("in-gray.pdf");

        let job = ConversionJob::new(&input, &output, &p.gray, defaults(&p))
            .with_target(ColorSpace::Gray)
            .with_intent(RenderIntent::Perceptual)
            .with_black_point(false);
        let builder = JobBuilder::new(TemplateCache::new(dir.path().join("cache")), gs.tool());
        let args = builder.build_args(&job).unwrap();
        assert!(args.contains(&"-sProcessColorModel=DeviceGRAY".into()));
        assert!(args.contains(&"-dRenderIntent=0".into()));

        let outcome = run_conversion(builder.tool(), &args).unwrap();
        assert_eq!(outcome.output, "Processing pages 1 through 1.\n");
        assert!(detect::is_pdf(&output));
    }

    /// A failing tool surfaces its output and is told apart from validation.
    #[cfg(unix)]
    #[test]
    fn failing_tool_is_process_failure() {
        let dir = tempdir().unwrap();
        let p = profiles(dir.path());
        let gs = FakeInstall::with_script(
            &dir.path().join("gs"),
            "10.02.1",
            "echo '**** Unable to open the initial device, quitting.' >&2\nexit 1",
        )
        .unwrap();
        let input = pdf(&dir.path().join("in.pdf"));

        let job = ConversionJob::new(&input, dir.path().join("out.pdf"), &p.cmyk, defaults(&p));
        let builder = JobBuilder::new(TemplateCache::new(dir.path().join("cache")), gs.tool());
        let args = builder.build_args(&job).unwrap();

        let err = run_conversion(builder.tool(), &args).unwrap_err();
        assert!(err.is_process_failure());
        assert!(err.to_string().contains("Unable to open the initial device"));
    }

    /// Refusals happen before the tool could ever start.
    #[test]
    fn refusals_are_not_process_failures() {
        let dir = tempdir().unwrap();
        let p = profiles(dir.path());
        let gs = FakeInstall::new(&dir.path().join("gs"), "10.02.1").unwrap();
        let input = pdf(&dir.path().join("in.pdf"));
        let builder = JobBuilder::new(TemplateCache::new(dir.path().join("cache")), gs.tool());

        let gray_target = ConversionJob::new(&input, dir.path().join("o.pdf"), &p.cmyk, defaults(&p))
            .with_target(ColorSpace::Gray);
        let err = builder.build_args(&gray_target).unwrap_err();
        assert!(!err.is_process_failure());
        assert!(matches!(err, JobError::ColorSpaceMismatch { role: ProfileRole::Output, .. }));

        let lab = fixtures::write_header_only(&dir.path().join("lab.icc"), b"Lab ").unwrap();
        let mut unknown_default = ConversionJob::new(&input, dir.path().join("o.pdf"), &p.cmyk, defaults(&p));
        unknown_default.defaults.cmyk = lab;
        assert!(matches!(
            builder.build_args(&unknown_default),
            Err(JobError::ColorSpaceMismatch {
                role: ProfileRole::Cmyk,
                actual: ColorSpace::Unknown,
                ..
            })
        ));
    }
}

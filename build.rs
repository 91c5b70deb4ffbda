// Build script for generating protobuf code / 用于生成protobuf代码的构建脚本

fn main() -> Result<(), Box<dyn std::error::Error>> {
    if std::env::var("SKIP_PROTOC").is_ok() {
        println!("cargo:rerun-if-env-changed=SKIP_PROTOC");
        return Ok(());
    }
    let path = protoc_bin_vendored::protoc_bin_path()?;
    unsafe {
        std::env::set_var("PROTOC", &path);
    }

    // Compile clinic backend protobuf files / 编译诊所后端protobuf文件
    tonic_build::configure()
        .build_server(false)
        .build_client(true)
        .compile_protos(
            &[
                "proto/clinic/patients.proto",
                "proto/clinic/doctors.proto",
                "proto/clinic/appointments.proto",
                "proto/clinic/tasks.proto",
            ],
            &["proto"],
        )?;

    // Tell cargo to rerun this build script if proto files change
    // 告诉cargo在proto文件更改时重新运行此构建脚本
    println!("cargo:rerun-if-changed=proto/");

    Ok(())
}

//! Template file contents
//!
//! Placeholders are Handlebars variables. Available keys:
//! `project_name`, `src_path`, `root_namespace`, `ns_upper`, `alias_target`,
//! `project_ident`.
//!
//! A `# sources` line inside a target's argument list marks where
//! `pf update` rewrites the list of source files.

/// Opening of the root `CMakeLists.txt`
pub const ROOT_CMAKE_HEAD: &str = r#"cmake_minimum_required(VERSION 3.10)

list(APPEND CMAKE_MODULE_PATH "${CMAKE_CURRENT_SOURCE_DIR}/cmake")

project({{project_name}} VERSION 0.0.1 DESCRIPTION "A great new project")

"#;

/// Root `CMakeLists.txt` block pulling in `third_party/`
pub const ROOT_CMAKE_THIRD_PARTY: &str = r"# Include third-party components we need for the build
add_subdirectory(third_party)

";

/// Root `CMakeLists.txt` block adding `src/` and, for top-level builds, `tests/`
pub const ROOT_CMAKE_MIDDLE: &str = r#"add_subdirectory(src)

option(BUILD_TESTS "Build tests" ON)
if(BUILD_TESTS AND (PROJECT_SOURCE_DIR STREQUAL CMAKE_SOURCE_DIR))
    enable_testing()
    add_subdirectory(tests)
endif()

"#;

/// Root `CMakeLists.txt` block adding `examples/`
pub const ROOT_CMAKE_EXAMPLES: &str = r#"option(BUILD_EXAMPLES "Build examples" ON)
if(BUILD_EXAMPLES AND (PROJECT_SOURCE_DIR STREQUAL CMAKE_SOURCE_DIR))
    add_subdirectory(examples)
endif()

"#;

/// `src/CMakeLists.txt` when headers live in a separate `include/` tree
pub const SRC_CMAKE_SEPARATE_HEADERS: &str = r"add_library(
  {{project_name}}
  # sources
  {{src_path}}/{{project_name}}.hpp
  {{src_path}}/{{project_name}}.cpp
  )
add_library({{alias_target}} ALIAS {{project_name}})
target_include_directories(
  {{project_name}}
  PRIVATE ${CMAKE_CURRENT_SOURCE_DIR}
  PUBLIC $<BUILD_INTERFACE:${PROJECT_SOURCE_DIR}/include>
  )
";

/// `src/CMakeLists.txt` when headers sit next to the sources
pub const SRC_CMAKE_MERGED_HEADERS: &str = r"add_library(
  {{project_name}}
  # sources
  {{src_path}}/{{project_name}}.hpp
  {{src_path}}/{{project_name}}.cpp
  )
add_library({{alias_target}} ALIAS {{project_name}})
target_include_directories(
  {{project_name}}
  PUBLIC $<BUILD_INTERFACE:${CMAKE_CURRENT_SOURCE_DIR}>
  )
";

/// First library header
pub const LIBRARY_HEADER: &str = r"#ifndef {{ns_upper}}_HPP_INCLUDED
#define {{ns_upper}}_HPP_INCLUDED

namespace {{root_namespace}} {

// Calculate the answer
int {{project_ident}}();

} // {{root_namespace}}

#endif // {{ns_upper}}_HPP_INCLUDED
";

/// First library source
pub const LIBRARY_SOURCE: &str = r#"#include <iostream>

#include "./{{project_name}}.hpp"

int {{root_namespace}}::{{project_ident}}() {
    std::cout << "Calculating the answer...\n";
    return 42;
}
"#;

/// `tests/my_test.cpp`
pub const TEST_SOURCE: &str = r#"#include <iostream>

#include <{{src_path}}/{{project_name}}.hpp>

int main() {
    const auto value = {{root_namespace}}::{{project_ident}}();
    if (value == 42) {
        std::cout << "We calculated the value correctly\n";
        return 0;
    } else {
        std::cout << "The value was incorrect!\n";
        return 1;
    }
}
"#;

/// `tests/CMakeLists.txt`
pub const TEST_CMAKE: &str = r"add_executable(
  first-test
  # sources
  my_test.cpp
  )
target_link_libraries(first-test PRIVATE {{alias_target}})
add_test(NAME first-test COMMAND first-test)
";

/// `examples/example1.cpp`
pub const EXAMPLE_SOURCE: &str = r#"#include <iostream>

#include <{{src_path}}/{{project_name}}.hpp>

int main() {
    std::cout << "I am an example executable\n";
    std::cout << "Let's calculate the value...\n";
    const auto value = {{root_namespace}}::{{project_ident}}();
    std::cout << "The value we got is " << value << '\n';
}
"#;

/// `examples/CMakeLists.txt`
pub const EXAMPLE_CMAKE: &str = r"add_executable(example1 example1.cpp)

target_link_libraries(example1 PRIVATE {{alias_target}})
";

/// `third_party/CMakeLists.txt`, left for the user to fill in
pub const THIRD_PARTY_CMAKE: &str = "\n";
